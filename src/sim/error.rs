//! 调度内核错误类型

use super::event::EventPhase;
use thiserror::Error;

/// 时间值无法参与全序比较（NaN）。
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid simulated time {value}: time must be orderable")]
pub struct InvalidTimeError {
    pub value: f64,
}

/// `EventScheduler::schedule` 拒绝的情况：同一个事件不能进入队列两次。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("event (seq {seq:?}) is already pending in the queue")]
    AlreadyScheduled { seq: Option<u64> },

    #[error("event was already removed from the queue ({phase:?}) and cannot be rescheduled")]
    AlreadyConsumed { phase: EventPhase },
}
