//! 调度器
//!
//! 定义事件调度器，维护逻辑时钟与事件队列。
//!
//! 取消采用惰性删除：`Event::deactivate()` 只修改事件自身的状态，不触碰堆；
//! 运行循环弹出 `Inactive` 事件时直接丢弃。

use super::error::ScheduleError;
use super::event::{Action, Event, EventPhase};
use super::queue::EventQueue;
use super::stats::SchedulerStats;
use super::time::SimTime;
use crate::trace::{TraceEventKind, TraceLogger};
use tracing::{debug, info, trace};

/// 事件调度器：维护逻辑时钟与事件队列。
#[derive(Debug, Default)]
pub struct EventScheduler {
    now: SimTime,
    queue: EventQueue,
    stats: SchedulerStats,
    trace: Option<TraceLogger>,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启用轨迹记录
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(TraceLogger::default());
        self
    }

    /// 获取当前逻辑时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 只读的队列视图（诊断/测试用）
    pub fn event_queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn trace(&self) -> Option<&TraceLogger> {
        self.trace.as_ref()
    }

    pub fn take_trace(&mut self) -> Option<TraceLogger> {
        self.trace.take()
    }

    /// 调度事件。
    ///
    /// 不检查 `event.time() >= now()`：调度到过去是调用方的责任，这类事件会在
    /// 当前时间被执行。同一个事件不能重复入队。
    pub fn schedule(&mut self, ev: &Event) -> Result<(), ScheduleError> {
        match ev.phase() {
            EventPhase::Unscheduled => {}
            EventPhase::Pending => {
                return Err(ScheduleError::AlreadyScheduled {
                    seq: ev.sequence(),
                });
            }
            phase @ (EventPhase::Executed | EventPhase::Discarded) => {
                return Err(ScheduleError::AlreadyConsumed { phase });
            }
        }

        self.enqueue(ev);
        Ok(())
    }

    /// 在 `at` 调度一个只带动作的新事件，返回其句柄。
    pub fn schedule_action<A: Action>(&mut self, at: SimTime, action: A) -> Event {
        let ev = Event::at(at).with_action(action);
        self.enqueue(&ev);
        ev
    }

    /// 弹出时间最近的事件并无条件停用，不执行其动作，也不推进时钟。
    ///
    /// 队列为空时什么也不做。被弹出的事件不会再回到队列。
    pub fn deactivate_next_event(&mut self) -> Option<Event> {
        let ev = self.queue.pop()?;
        ev.deactivate();
        ev.mark_discarded();
        drop(ev.take_action());
        self.stats.deactivated += 1;
        self.record(&ev, TraceEventKind::Deactivated);

        debug!(
            at = %ev.time(),
            seq = ev.sequence(),
            remaining_queue = self.queue.len(),
            "停用队首事件"
        );
        Some(ev)
    }

    /// 执行下一个 `Active` 事件并返回它；途中遇到的 `Inactive` 事件被丢弃。
    ///
    /// 队列耗尽时返回 `None`。
    pub fn step(&mut self) -> Option<Event> {
        while let Some(ev) = self.queue.pop() {
            if ev.is_active() {
                self.execute(&ev);
                return Some(ev);
            }
            self.discard(&ev);
        }
        None
    }

    /// 运行所有事件直到队列为空，返回执行的事件数。
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> usize {
        info!("▶️  开始运行调度");
        debug!(now = %self.now, queue_size = self.queue.len(), "初始状态");

        let mut executed = 0;
        while self.step().is_some() {
            executed += 1;
        }

        info!(
            total_events = executed,
            final_time = %self.now,
            "✅ 调度完成"
        );
        executed
    }

    /// 运行直到事件队列为空或队首事件晚于 `until`。
    ///
    /// 越界的事件（无论状态）留在队列中，供后续 `run`/`step` 处理，期间仍可切换状态；
    /// 时钟不会被推到 `until`。
    #[tracing::instrument(skip(self))]
    pub fn run_until(&mut self, until: SimTime) -> usize {
        let mut executed = 0;
        loop {
            let Some((active, at)) = self.queue.peek().map(|ev| (ev.is_active(), ev.time())) else {
                break;
            };
            if at > until {
                break;
            }
            if !active {
                if let Some(ev) = self.queue.pop() {
                    self.discard(&ev);
                }
                continue;
            }
            if self.step().is_some() {
                executed += 1;
            }
        }

        debug!(
            executed,
            now = %self.now,
            remaining_queue = self.queue.len(),
            "run_until 结束"
        );
        executed
    }

    fn execute(&mut self, ev: &Event) {
        self.now = self.now.max(ev.time());
        ev.mark_executed();
        self.stats.executed += 1;

        debug!(
            event_num = self.stats.executed,
            now = %self.now,
            scheduled_at = %ev.time(),
            seq = ev.sequence(),
            remaining_queue = self.queue.len(),
            "执行事件"
        );
        self.record(ev, TraceEventKind::Executed);

        if let Some(action) = ev.take_action() {
            action.execute(self);
        }
    }

    #[tracing::instrument(skip(self, ev), fields(schedule_at = %ev.time(), label = ?ev.label()))]
    fn enqueue(&mut self, ev: &Event) {
        trace!(now = %self.now, status = ?ev.status(), "调度事件");
        self.queue.push(ev.clone());
        self.stats.scheduled += 1;
        self.record(ev, TraceEventKind::Scheduled);

        debug!(queue_size = self.queue.len(), "事件已加入队列");
    }

    fn discard(&mut self, ev: &Event) {
        ev.mark_discarded();
        drop(ev.take_action());
        self.stats.discarded += 1;
        trace!(at = %ev.time(), seq = ev.sequence(), "丢弃已停用事件");
        self.record(ev, TraceEventKind::Discarded);
    }

    fn record(&mut self, ev: &Event, kind: TraceEventKind) {
        if let Some(t) = &mut self.trace {
            t.record(self.now, ev, kind);
        }
    }
}
