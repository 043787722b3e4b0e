//! 调度内核模块
//!
//! 此模块包含离散事件调度的核心组件：仿真时间、事件、事件队列和调度器。

// 子模块声明
mod error;
mod event;
mod queue;
mod scheduled_event;
mod scheduler;
mod stats;
mod time;

// 重新导出公共接口
pub use error::{InvalidTimeError, ScheduleError};
pub use event::{Action, Event, EventPhase, EventStatus};
pub use queue::EventQueue;
pub use scheduler::EventScheduler;
pub use stats::SchedulerStats;
pub use time::SimTime;
