use std::{any::Any, sync::Arc};

use serde_json::Value;

use super::{schema::PUSH_EVENT_SCHEMA, Constraint, FieldPath, Violations};

pub trait EventValidator: std::fmt::Debug + Send + Sync {
    /// `event` is `None` when the body could not be read as a JSON object.
    fn validate(&self, event: Option<&Value>) -> Violations;

    fn as_any(&self) -> &dyn Any;
}

/// Validates events against a constraint tree.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Arc<dyn Constraint>,
}

impl SchemaValidator {
    pub fn new(schema: Arc<dyn Constraint>) -> Self {
        Self { schema }
    }

    pub fn push_event() -> Self {
        Self::new(Arc::new(PushEventSchema))
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::push_event()
    }
}

impl EventValidator for SchemaValidator {
    fn validate(&self, event: Option<&Value>) -> Violations {
        let mut violations = Violations::new();
        self.schema.check(event, &FieldPath::root(), &mut violations);
        violations
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Handle on the process-wide push event schema.
#[derive(Debug)]
struct PushEventSchema;

impl Constraint for PushEventSchema {
    fn check(&self, value: Option<&Value>, path: &FieldPath, violations: &mut Violations) {
        PUSH_EVENT_SCHEMA.check(value, path, violations)
    }
}
