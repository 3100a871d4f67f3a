mod constraint;
mod reporter;
pub mod schema;
mod validator;
mod violation;

pub use self::constraint::{
    Collection, Constraint, NotBlank, Pattern, BLANK_VALUE, MISSING_FIELD, NOT_AN_OBJECT,
    NOT_A_STRING, UNEXPECTED_FIELD,
};
pub use self::reporter::{TracingReporter, ViolationReporter};
pub use self::validator::{EventValidator, SchemaValidator};
pub use self::violation::{FieldPath, Violation, Violations};
