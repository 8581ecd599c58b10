//! Log and edit-event callbacks observed from the outside.
//!
//! The callbacks are process-wide, so everything lives in one test to keep
//! parallel test threads from swapping them underneath each other.

use runtext::event::{clear_event_callback, clear_log_callback};
use runtext::{
    AttributeOverrides, AttributedSequence, EditEvent, LogLevel, set_event_callback,
    set_log_callback,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn callbacks_see_structural_edits() {
    init_tracing();

    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let logs: Arc<Mutex<Vec<(LogLevel, String)>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&events);
    set_event_callback(move |name, data| {
        debug!(event = name, data, "edit event");
        sink.lock().unwrap().push(name.to_string());
    });
    let sink = Arc::clone(&logs);
    set_log_callback(move |level, message| {
        sink.lock().unwrap().push((level, message.to_string()));
    });

    let mut para = AttributedSequence::new();
    for ch in "abcdefghij".chars() {
        para.push_char(ch).unwrap();
    }
    let snapshot = para
        .apply_format(2, 5, &AttributeOverrides::builder().bold(true).build())
        .unwrap();
    para.restore_runs(snapshot).unwrap();

    let tail = para.split_at(4).unwrap();
    let previous = para.combine(tail.clone()).unwrap();
    para.decompose(&tail, previous).unwrap();
    // Nothing to strip: only the runs are reinstated.
    let runs = para.snapshot_runs();
    para.decompose(&AttributedSequence::new(), runs).unwrap();
    // Undersized target: skipped with a warning.
    let mut small = AttributedSequence::new();
    small.decompose(&para, Default::default()).unwrap();

    let dump = para.debug_dump();
    info!(%dump, "final paragraph");

    let events = events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            EditEvent::RunsRestored.name(),
            EditEvent::Split.name(),
            EditEvent::Combine.name(),
            EditEvent::Decompose.name(),
            EditEvent::Decompose.name(),
        ]
    );

    let logs = logs.lock().unwrap().clone();
    assert!(
        logs.iter()
            .any(|(level, msg)| *level == LogLevel::Debug && msg.contains("split in three"))
    );
    assert!(
        logs.iter()
            .any(|(level, msg)| *level == LogLevel::Warn && msg.contains("decompose skipped"))
    );
    assert!(
        logs.iter()
            .any(|(level, msg)| *level == LogLevel::Debug && msg.contains("paragraph:"))
    );
    assert!(!logs.iter().any(|(level, _)| *level == LogLevel::Error));

    clear_event_callback();
    clear_log_callback();
}
