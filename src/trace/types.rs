use crate::sim::{Event, SimTime};
use serde::{Deserialize, Serialize};

/// 轨迹事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 事件入队
    Scheduled,
    /// 运行循环执行了一个 `Active` 事件
    Executed,
    /// 运行循环弹出了一个 `Inactive` 事件并丢弃
    Discarded,
    /// `deactivate_next_event` 弹出并停用了队首事件
    Deactivated,
}

/// 一条轨迹记录（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 记录时的逻辑时钟
    pub now: SimTime,
    /// 事件自身的调度时间
    pub at: SimTime,
    pub seq: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: TraceEventKind,
}

/// 一个简单的事件收集器（存内存，运行结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    pub(crate) fn record(&mut self, now: SimTime, ev: &Event, kind: TraceEventKind) {
        self.push(TraceEvent {
            now,
            at: ev.time(),
            seq: ev.sequence(),
            label: ev.label().map(|l| l.to_string()),
            kind,
        });
    }

    /// 按类型筛选记录
    pub fn of_kind(&self, kind: TraceEventKind) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |ev| ev.kind == kind)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}
