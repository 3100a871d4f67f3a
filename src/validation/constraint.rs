use std::fmt;

use serde_json::{Map, Value};

use super::{FieldPath, Violation, Violations};

pub const MISSING_FIELD: &str = "This field is missing.";
pub const UNEXPECTED_FIELD: &str = "This field was not expected.";
pub const NOT_AN_OBJECT: &str = "This value should be of type object.";
pub const NOT_A_STRING: &str = "This value should be of type string.";
pub const BLANK_VALUE: &str = "This value should not be blank.";

/// A rule applied to one location of a JSON document.
///
/// `value` is `None` when the field is absent. Implementations append to
/// `violations` and never stop at the first problem.
pub trait Constraint: fmt::Debug + Send + Sync {
    fn check(&self, value: Option<&Value>, path: &FieldPath, violations: &mut Violations);
}

/// Object constraint: each declared field is checked by its own constraint.
#[derive(Debug)]
pub struct Collection {
    fields: Vec<(String, Box<dyn Constraint>)>,
    allow_extra_fields: bool,
}

impl Collection {
    /// Undeclared keys are ignored.
    pub fn allowing_extra_fields() -> Self {
        Self {
            fields: Vec::new(),
            allow_extra_fields: true,
        }
    }

    /// Undeclared keys are reported.
    pub fn strict() -> Self {
        Self {
            fields: Vec::new(),
            allow_extra_fields: false,
        }
    }

    pub fn field<T: Into<String>, C: Constraint + 'static>(mut self, name: T, constraint: C) -> Self {
        self.fields.push((name.into(), Box::new(constraint)));
        self
    }

    fn check_absent_fields(&self, path: &FieldPath, violations: &mut Violations) {
        for (name, constraint) in &self.fields {
            constraint.check(None, &path.join(name.as_str()), violations);
        }
    }

    fn check_object(&self, object: &Map<String, Value>, path: &FieldPath, violations: &mut Violations) {
        for (name, constraint) in &self.fields {
            constraint.check(object.get(name), &path.join(name.as_str()), violations);
        }

        if !self.allow_extra_fields {
            for (key, value) in object {
                if !self.fields.iter().any(|(name, _)| name == key) {
                    violations.push(Violation::new(
                        path.join(key.as_str()),
                        UNEXPECTED_FIELD,
                        value.clone(),
                    ));
                }
            }
        }
    }
}

impl Constraint for Collection {
    fn check(&self, value: Option<&Value>, path: &FieldPath, violations: &mut Violations) {
        match value {
            Some(Value::Object(object)) => self.check_object(object, path, violations),
            // Anything that is not an object holds none of the declared fields.
            Some(other) => {
                violations.push(Violation::new(path.clone(), NOT_AN_OBJECT, other.clone()));
                self.check_absent_fields(path, violations);
            }
            None => self.check_absent_fields(path, violations),
        }
    }
}

/// String constraint backed by a matching rule.
pub struct Pattern {
    message: &'static str,
    rule: fn(&str) -> bool,
}

impl Pattern {
    pub fn new(message: &'static str, rule: fn(&str) -> bool) -> Self {
        Self { message, rule }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern").field("message", &self.message).finish()
    }
}

impl Constraint for Pattern {
    fn check(&self, value: Option<&Value>, path: &FieldPath, violations: &mut Violations) {
        match value {
            None => violations.push(Violation::new(path.clone(), MISSING_FIELD, Value::Null)),
            Some(Value::String(s)) if (self.rule)(s) => {}
            Some(Value::String(s)) => {
                violations.push(Violation::new(path.clone(), self.message, Value::String(s.clone())))
            }
            Some(other) => violations.push(Violation::new(path.clone(), NOT_A_STRING, other.clone())),
        }
    }
}

/// Requires a present value that is not `null`, `false`, `""`, `[]` or `{}`.
#[derive(Debug, Default)]
pub struct NotBlank;

impl NotBlank {
    fn is_blank(value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(false) => true,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }
}

impl Constraint for NotBlank {
    fn check(&self, value: Option<&Value>, path: &FieldPath, violations: &mut Violations) {
        match value {
            None => violations.push(Violation::new(path.clone(), MISSING_FIELD, Value::Null)),
            Some(v) if Self::is_blank(v) => {
                violations.push(Violation::new(path.clone(), BLANK_VALUE, v.clone()))
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    fn run(constraint: &dyn Constraint, value: Option<&Value>) -> Violations {
        let mut violations = Violations::new();
        constraint.check(value, &FieldPath::root(), &mut violations);
        violations
    }

    fn starts_with_a(s: &str) -> bool {
        s.starts_with('a')
    }

    #[test]
    fn test_pattern() {
        let pattern = Pattern::new("should start with a", starts_with_a);

        assert!(run(&pattern, Some(&json!("abc"))).is_empty());

        let violations = run(&pattern, Some(&json!("bcd")));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.iter().next().unwrap().message(), "should start with a");

        let violations = run(&pattern, Some(&json!(12)));
        assert_eq!(violations.iter().next().unwrap().message(), NOT_A_STRING);
        assert_eq!(violations.iter().next().unwrap().actual(), &json!(12));

        let violations = run(&pattern, None);
        assert_eq!(violations.iter().next().unwrap().message(), MISSING_FIELD);
        assert_eq!(violations.iter().next().unwrap().actual(), &Value::Null);
    }

    #[test]
    fn test_not_blank() {
        for blank in [json!(null), json!(false), json!(""), json!([]), json!({})] {
            let violations = run(&NotBlank, Some(&blank));
            assert_eq!(violations.len(), 1, "{} should be blank", blank);
            assert_eq!(violations.iter().next().unwrap().message(), BLANK_VALUE);
        }

        for filled in [json!("x"), json!(" "), json!(0), json!(true), json!(["x"])] {
            assert!(run(&NotBlank, Some(&filled)).is_empty(), "{} should not be blank", filled);
        }

        assert_eq!(run(&NotBlank, None).iter().next().unwrap().message(), MISSING_FIELD);
    }

    #[test]
    fn test_collection_collects_every_field() {
        let collection = Collection::allowing_extra_fields()
            .field("a", NotBlank)
            .field("b", NotBlank)
            .field("nested", Collection::allowing_extra_fields().field("c", NotBlank));

        let violations = run(&collection, Some(&json!({"a": "", "extra": 1, "nested": {}})));
        assert_eq!(violations.paths(), vec!["a", "b", "nested.c"]);
    }

    #[test]
    fn test_collection_absent_reports_every_leaf() {
        let collection = Collection::allowing_extra_fields()
            .field("a", NotBlank)
            .field("nested", Collection::allowing_extra_fields().field("c", NotBlank));

        let violations = run(&collection, None);
        assert_eq!(violations.paths(), vec!["a", "nested.c"]);
        assert!(violations.iter().all(|v| v.message() == MISSING_FIELD));
    }

    #[test]
    fn test_collection_wrong_type() {
        let collection = Collection::allowing_extra_fields()
            .field("nested", Collection::allowing_extra_fields().field("c", NotBlank));

        let violations = run(&collection, Some(&json!({"nested": "flat"})));
        assert_eq!(violations.paths(), vec!["nested", "nested.c"]);

        let messages: Vec<_> = violations.iter().map(|v| v.message()).collect();
        assert_eq!(messages, vec![NOT_AN_OBJECT, MISSING_FIELD]);
        assert_eq!(violations.iter().next().unwrap().actual(), &json!("flat"));

        let violations = run(&collection, Some(&json!({"nested": null})));
        assert_eq!(violations.paths(), vec!["nested", "nested.c"]);
    }

    #[test]
    fn test_strict_collection_reports_extra_fields() {
        let collection = Collection::strict().field("a", NotBlank);

        let violations = run(&collection, Some(&json!({"a": "x", "b": 1, "c": 2})));
        assert_eq!(violations.paths(), vec!["b", "c"]);
        assert!(violations.iter().all(|v| v.message() == UNEXPECTED_FIELD));
    }
}
