//! 调度轨迹记录（用于离线分析/回放）
//!
//! 每个事件在入队、执行、惰性丢弃、被管理性停用时各记录一条结构化 JSON 事件，
//! 而不是解析文本日志。

mod types;

pub use types::{TraceEvent, TraceEventKind, TraceLogger};
