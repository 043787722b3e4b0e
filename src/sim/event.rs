//! 事件
//!
//! 定义可调度事件、事件状态以及事件动作接口。
//!
//! `Event` 是一个共享句柄：创建者保留一份用于之后的 `activate()`/`deactivate()`，
//! 调度器的队列持有另一份用于排序和弹出。内核是单线程的，因此用 `Rc` + `Cell`。

use super::error::InvalidTimeError;
use super::scheduler::EventScheduler;
use super::time::SimTime;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// 事件状态。
///
/// `Active`/`Inactive` 在事件被执行前可以任意切换；`Executed` 只由运行循环设置，且不可逆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Active,
    Inactive,
    Executed,
}

/// 事件与队列的关系。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPhase {
    /// 尚未被调度
    Unscheduled,
    /// 在队列中等待弹出
    Pending,
    /// 被运行循环弹出并执行
    Executed,
    /// 被弹出但未执行（惰性删除或 `deactivate_next_event`）
    Discarded,
}

/// 事件动作：由运行循环执行一次。使用 `self: Box<Self>` 以支持 move/所有权转移。
///
/// 动作可以通过 `sched` 继续调度后续事件。
pub trait Action: 'static {
    fn execute(self: Box<Self>, sched: &mut EventScheduler);
}

impl<F> Action for F
where
    F: FnOnce(&mut EventScheduler) + 'static,
{
    fn execute(self: Box<Self>, sched: &mut EventScheduler) {
        (*self)(sched)
    }
}

struct EventInner {
    time: SimTime,
    status: Cell<EventStatus>,
    phase: Cell<EventPhase>,
    seq: Cell<Option<u64>>,
    action: RefCell<Option<Box<dyn Action>>>,
    context: RefCell<Option<Rc<dyn Any>>>,
    label: RefCell<Option<Rc<str>>>,
}

/// 可调度事件（共享句柄，`clone` 只增加引用计数）。
#[derive(Clone)]
pub struct Event {
    inner: Rc<EventInner>,
}

impl Event {
    /// 以原始数值时间构造事件；NaN 会被拒绝。
    pub fn new(time: f64) -> Result<Event, InvalidTimeError> {
        Ok(Event::at(SimTime::new(time)?))
    }

    /// 以已校验的 `SimTime` 构造事件，初始状态为 `Active`。
    pub fn at(time: SimTime) -> Event {
        Event {
            inner: Rc::new(EventInner {
                time,
                status: Cell::new(EventStatus::Active),
                phase: Cell::new(EventPhase::Unscheduled),
                seq: Cell::new(None),
                action: RefCell::new(None),
                context: RefCell::new(None),
                label: RefCell::new(None),
            }),
        }
    }

    /// 附加执行动作（替换之前的动作）。
    pub fn with_action<A: Action>(self, action: A) -> Event {
        *self.inner.action.borrow_mut() = Some(Box::new(action));
        self
    }

    /// 附加上下文负载（替换之前的负载）。
    pub fn with_context<T: Any>(self, context: T) -> Event {
        *self.inner.context.borrow_mut() = Some(Rc::new(context));
        self
    }

    /// 附加诊断用标签（替换之前的标签）。
    pub fn with_label(self, label: impl Into<Rc<str>>) -> Event {
        *self.inner.label.borrow_mut() = Some(label.into());
        self
    }

    pub fn time(&self) -> SimTime {
        self.inner.time
    }

    pub fn status(&self) -> EventStatus {
        self.inner.status.get()
    }

    pub fn phase(&self) -> EventPhase {
        self.inner.phase.get()
    }

    /// 入队时分配的序列号；未入队时为 `None`。
    pub fn sequence(&self) -> Option<u64> {
        self.inner.seq.get()
    }

    pub fn label(&self) -> Option<Rc<str>> {
        self.inner.label.borrow().clone()
    }

    /// 按类型取上下文负载。
    pub fn context<T: Any>(&self) -> Option<Rc<T>> {
        let ctx = self.inner.context.borrow().clone()?;
        ctx.downcast::<T>().ok()
    }

    pub fn has_action(&self) -> bool {
        self.inner.action.borrow().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.status() == EventStatus::Active
    }

    pub fn is_pending(&self) -> bool {
        self.phase() == EventPhase::Pending
    }

    /// 幂等地置为 `Active`。已执行的事件不受影响。
    pub fn activate(&self) {
        if self.status() != EventStatus::Executed {
            self.inner.status.set(EventStatus::Active);
        }
    }

    /// 幂等地置为 `Inactive`。已执行的事件不受影响。
    pub fn deactivate(&self) {
        if self.status() != EventStatus::Executed {
            self.inner.status.set(EventStatus::Inactive);
        }
    }

    /// 两个句柄是否指向同一个事件。
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn mark_pending(&self, seq: u64) {
        self.inner.seq.set(Some(seq));
        self.inner.phase.set(EventPhase::Pending);
    }

    pub(crate) fn mark_discarded(&self) {
        self.inner.phase.set(EventPhase::Discarded);
    }

    pub(crate) fn mark_executed(&self) {
        self.inner.status.set(EventStatus::Executed);
        self.inner.phase.set(EventPhase::Executed);
    }

    pub(crate) fn take_action(&self) -> Option<Box<dyn Action>> {
        self.inner.action.borrow_mut().take()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("time", &self.time())
            .field("seq", &self.sequence())
            .field("status", &self.status())
            .field("phase", &self.phase())
            .field("label", &self.label())
            .field("has_action", &self.has_action())
            .finish()
    }
}
