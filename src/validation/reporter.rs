use std::any::Any;

use super::Violation;

/// Receives each violation of a rejected event before the request fails.
pub trait ViolationReporter: std::fmt::Debug + Send + Sync {
    fn warn(&self, violation: &Violation);

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Default, Clone)]
pub struct TracingReporter;

impl ViolationReporter for TracingReporter {
    fn warn(&self, violation: &Violation) {
        tracing::warn!(actual = %violation.actual(), "{}", violation);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fmt,
        sync::{Arc, Mutex},
    };

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing::{
        field::{Field, Visit},
        Event, Level, Subscriber,
    };
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer, Registry,
    };

    use crate::validation::{FieldPath, Violation};

    use super::{TracingReporter, ViolationReporter};

    #[derive(Debug, PartialEq)]
    struct RecordedEvent {
        level: Level,
        message: String,
        actual: String,
    }

    #[derive(Clone, Default)]
    struct RecordingLayer {
        events: Arc<Mutex<Vec<RecordedEvent>>>,
    }

    #[derive(Default)]
    struct EventFields {
        message: String,
        actual: String,
    }

    impl Visit for EventFields {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            match field.name() {
                "message" => self.message = format!("{:?}", value),
                "actual" => self.actual = format!("{:?}", value),
                _ => {}
            }
        }
    }

    impl<S: Subscriber> Layer<S> for RecordingLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = EventFields::default();
            event.record(&mut fields);

            self.events.lock().unwrap().push(RecordedEvent {
                level: *event.metadata().level(),
                message: fields.message,
                actual: fields.actual,
            });
        }
    }

    #[test]
    fn test_warn_emits_event_with_actual_value() {
        let layer = RecordingLayer::default();
        let subscriber = Registry::default().with(layer.clone());
        let violation = Violation::new(
            FieldPath::from("ref"),
            "This value should start with \"refs/heads/\".",
            json!("main"),
        );

        tracing::subscriber::with_default(subscriber, || TracingReporter.warn(&violation));

        let events = layer.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![RecordedEvent {
                level: Level::WARN,
                message: "ref This value should start with \"refs/heads/\".".into(),
                actual: "\"main\"".into(),
            }]
        );
    }
}
