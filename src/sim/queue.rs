//! 事件队列
//!
//! 按 `(time, seq)` 排序的最小堆。队列只负责排序，从不查看事件状态。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use std::collections::BinaryHeap;

#[derive(Default)]
pub struct EventQueue {
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入队并分配序列号（按入队顺序递增，同一时间先入先出）。
    pub fn push(&mut self, ev: Event) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        ev.mark_pending(seq);
        self.q.push(ScheduledEvent {
            at: ev.time(),
            seq,
            ev,
        });
    }

    pub fn peek(&self) -> Option<&Event> {
        self.q.peek().map(|item| &item.ev)
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.q.pop().map(|item| item.ev)
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 按弹出顺序列出所有待处理事件（包括等待惰性删除的 `Inactive` 事件）。
    pub fn iter_ordered(&self) -> Vec<&Event> {
        let mut items = self.q.iter().collect::<Vec<_>>();
        items.sort_by_key(|item| item.key());
        items.into_iter().map(|item| &item.ev).collect()
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.q.len())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}
