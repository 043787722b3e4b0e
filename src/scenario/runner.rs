use super::error::ScenarioError;
use super::spec::{OpSpec, ScenarioSpec};
use crate::sim::{Event, EventScheduler, SchedulerStats, SimTime};
use crate::trace::TraceLogger;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// 记录调度轨迹
    pub trace: bool,
    /// 场景没有 `ops` 时，运行到这个时间为止而不是运行到结束；与 `ops` 同时出现会被拒绝
    pub until: Option<SimTime>,
}

/// 场景运行结果摘要
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub final_time: SimTime,
    pub stats: SchedulerStats,
    /// 按执行顺序
    pub executed: Vec<String>,
    /// 被 `deactivate_next` 弹出的事件，按弹出顺序
    pub deactivated: Vec<String>,
    /// 仍在队列中的事件，按弹出顺序
    pub remaining: Vec<String>,
}

#[derive(Debug)]
pub struct ScenarioRun {
    pub report: ScenarioReport,
    pub trace: Option<TraceLogger>,
}

pub fn run_scenario(spec: &ScenarioSpec, opts: RunOptions) -> Result<ScenarioRun, ScenarioError> {
    if opts.until.is_some() && !spec.ops.is_empty() {
        return Err(ScenarioError::UntilWithOps);
    }

    let mut sched = if opts.trace {
        EventScheduler::new().with_trace()
    } else {
        EventScheduler::new()
    };

    let executed = Rc::new(RefCell::new(Vec::new()));
    let mut by_label: HashMap<String, Event> = HashMap::new();

    for (idx, es) in spec.events.iter().enumerate() {
        let label = es.label.clone().unwrap_or_else(|| format!("e{idx}"));
        if by_label.contains_key(&label) {
            return Err(ScenarioError::DuplicateLabel(label));
        }

        let log = Rc::clone(&executed);
        let action_label = label.clone();
        let ev = Event::at(es.time)
            .with_label(label.clone())
            .with_action(move |_: &mut EventScheduler| {
                log.borrow_mut().push(action_label);
            });
        if !es.active {
            ev.deactivate();
        }
        sched.schedule(&ev)?;
        by_label.insert(label, ev);
    }

    let mut deactivated = Vec::new();
    if spec.ops.is_empty() {
        match opts.until {
            Some(until) => sched.run_until(until),
            None => sched.run(),
        };
    }
    for op in &spec.ops {
        debug!(?op, now = %sched.now(), "场景操作");
        match op {
            OpSpec::DeactivateNext => {
                if let Some(ev) = sched.deactivate_next_event() {
                    deactivated.push(ev.label().map(|l| l.to_string()).unwrap_or_default());
                }
            }
            OpSpec::Step => {
                sched.step();
            }
            OpSpec::Run => {
                sched.run();
            }
            OpSpec::RunUntil { until } => {
                sched.run_until(*until);
            }
            OpSpec::Activate { label } => lookup(&by_label, label)?.activate(),
            OpSpec::Deactivate { label } => lookup(&by_label, label)?.deactivate(),
        }
    }

    let remaining = sched
        .event_queue()
        .iter_ordered()
        .into_iter()
        .map(|ev| ev.label().map(|l| l.to_string()).unwrap_or_default())
        .collect();

    let report = ScenarioReport {
        final_time: sched.now(),
        stats: *sched.stats(),
        executed: executed.take(),
        deactivated,
        remaining,
    };
    info!(
        final_time = %report.final_time,
        executed = report.stats.executed,
        discarded = report.stats.discarded,
        deactivated = report.stats.deactivated,
        "场景运行完成"
    );

    Ok(ScenarioRun {
        report,
        trace: sched.take_trace(),
    })
}

fn lookup<'a>(by_label: &'a HashMap<String, Event>, label: &str) -> Result<&'a Event, ScenarioError> {
    by_label
        .get(label)
        .ok_or_else(|| ScenarioError::UnknownLabel(label.to_owned()))
}
