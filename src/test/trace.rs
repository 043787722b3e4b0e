use crate::sim::{Event, EventScheduler, SimTime};
use crate::trace::{TraceEventKind, TraceLogger};

#[test]
fn scheduler_without_trace_records_nothing() {
    let mut sched = EventScheduler::new();
    sched.schedule(&Event::new(1.0).expect("event")).expect("schedule");
    sched.run();
    assert!(sched.trace().is_none());
}

#[test]
fn trace_records_each_lifecycle_transition() {
    let mut sched = EventScheduler::new().with_trace();
    let a = Event::new(1.0).expect("event").with_label("a");
    let b = Event::new(2.0).expect("event").with_label("b");
    let c = Event::new(3.0).expect("event").with_label("c");
    for ev in [&a, &b, &c] {
        sched.schedule(ev).expect("schedule");
    }
    b.deactivate();

    sched.deactivate_next_event();
    sched.run();

    let trace = sched.take_trace().expect("trace enabled");
    let kinds = trace.events.iter().map(|e| e.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [
            TraceEventKind::Scheduled,
            TraceEventKind::Scheduled,
            TraceEventKind::Scheduled,
            TraceEventKind::Deactivated,
            TraceEventKind::Discarded,
            TraceEventKind::Executed,
        ]
    );

    let executed = trace
        .of_kind(TraceEventKind::Executed)
        .next()
        .expect("executed record");
    assert_eq!(executed.label.as_deref(), Some("c"));
    assert_eq!(executed.at, SimTime::from(3));
    assert_eq!(executed.now, SimTime::from(3));
    assert_eq!(executed.seq, Some(2));

    let deactivated = trace
        .of_kind(TraceEventKind::Deactivated)
        .next()
        .expect("deactivated record");
    assert_eq!(deactivated.now, SimTime::ZERO);
}

#[test]
fn trace_serializes_as_json_array_with_snake_case_kinds() {
    let mut sched = EventScheduler::new().with_trace();
    sched.schedule(&Event::new(1.0).expect("event")).expect("schedule");
    sched.run();

    let json = sched
        .trace()
        .expect("trace enabled")
        .to_json_pretty()
        .expect("serialize");
    let v: serde_json::Value = serde_json::from_str(&json).expect("parse");
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["kind"], "scheduled");
    assert_eq!(arr[1]["kind"], "executed");
    assert_eq!(arr[1]["at"], 1.0);
    assert!(arr[1].get("label").is_none());
}

#[test]
fn trace_logger_push_appends() {
    let mut logger = TraceLogger::default();
    assert!(logger.events.is_empty());
    logger.push(crate::trace::TraceEvent {
        now: SimTime::ZERO,
        at: SimTime::from(1),
        seq: None,
        label: None,
        kind: TraceEventKind::Scheduled,
    });
    assert_eq!(logger.of_kind(TraceEventKind::Scheduled).count(), 1);
    assert_eq!(logger.of_kind(TraceEventKind::Executed).count(), 0);
}

#[test]
fn schedule_action_goes_through_the_same_enqueue_path_as_schedule() {
    let mut sched = EventScheduler::new().with_trace();
    sched
        .schedule(&Event::new(2.0).expect("event").with_label("plain"))
        .expect("schedule");
    let follow = sched.schedule_action(SimTime::from(1), |_: &mut EventScheduler| {});

    assert!(follow.is_pending());
    assert_eq!(follow.sequence(), Some(1));
    assert_eq!(sched.stats().scheduled, 2);

    let trace = sched.trace().expect("trace enabled");
    let scheduled = trace
        .of_kind(TraceEventKind::Scheduled)
        .map(|e| (e.at, e.seq))
        .collect::<Vec<_>>();
    assert_eq!(
        scheduled,
        [(SimTime::from(2), Some(0)), (SimTime::from(1), Some(1))]
    );
}
