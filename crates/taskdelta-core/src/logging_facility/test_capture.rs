//! Test capture mode for deterministic logging assertions
//!
//! Installs a global subscriber whose only layer records every event in
//! memory, so tests can assert on the structured fields that were emitted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use taskdelta_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Get a recorded field rendered as a string
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    events: EventLog,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let fields = visitor.fields;
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle for accessing captured events in tests
#[derive(Clone)]
pub struct TestCapture {
    events: EventLog,
}

impl TestCapture {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Get the captured events for one operation and event name
    pub fn events_for(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event))
            .collect()
    }

    /// Assert that an event exists with the given operation and event type
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let total = self.events().len();
        assert!(
            !self.events_for(op, event).is_empty(),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            total
        );
    }

    /// Clear all captured events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// Installs the capturing subscriber on first use and returns the shared
/// handle. Tests in the same binary share one event log, so they should
/// filter by a unique op or field value. If a different global subscriber
/// was installed first, the handle is still returned but records nothing.
///
/// # Example
///
/// ```
/// use taskdelta_core::logging_facility::test_capture::init_test_capture;
/// use taskdelta_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_example");
/// capture.assert_event_exists("doc_capture_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = EventLog::default();
            let _ = tracing_subscriber::registry()
                .with(CaptureLayer {
                    events: events.clone(),
                })
                .try_init();
            TestCapture { events }
        })
        .clone()
}
