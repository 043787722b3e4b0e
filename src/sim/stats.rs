//! 统计信息
//!
//! 定义调度器运行统计数据结构。

use serde::{Deserialize, Serialize};

/// 调度器统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// 成功入队的事件数
    pub scheduled: u64,
    /// 被运行循环执行的事件数
    pub executed: u64,
    /// 运行循环弹出时已是 `Inactive`、被惰性删除的事件数
    pub discarded: u64,
    /// 被 `deactivate_next_event` 弹出的事件数
    pub deactivated: u64,
}
