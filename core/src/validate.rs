//! Type validation behind the binding pipeline.
//!
//! The dispatcher never validates values itself: it talks to a [`Validator`]
//! through a narrow interface, so any validation engine can be swapped in
//! without touching dispatch or coercion. [`StandardValidator`] is the
//! built-in engine, understanding `|`-separated unions of the primitive
//! kinds (`string`, `number`, `boolean`, `bigint`, `undefined`).

use thiserror::Error;

use crate::types::{Value, ValueKind};

/// A value was rejected by the validator.
///
/// The `summary` is a human-readable sentence surfaced verbatim to the end
/// user, prefixed by the binding stage with the argument or option it
/// concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{summary}")]
pub struct ValidationFailure {
    /// Human-readable rejection summary (e.g., "must be a number (was a string)").
    pub summary: String,
}

/// The validation engine consumed by coercion, binding, and help generation.
///
/// A type descriptor is an opaque string owned by the validator; the
/// framework only ever passes descriptors through and asks these four
/// questions about them.
pub trait Validator: Send + Sync {
    /// Runs a value through the descriptor; acceptance yields the (possibly
    /// refined) typed value, rejection yields a structured failure.
    fn validate(&self, type_spec: &str, value: &Value) -> Result<Value, ValidationFailure>;

    /// Human-readable description of the accepted input shape
    /// (e.g., "a number").
    fn describe(&self, type_spec: &str) -> String;

    /// Whether the descriptor's accepted input includes the given kind.
    /// The coercion pipeline uses this to pick a conversion target.
    fn accepts(&self, type_spec: &str, kind: ValueKind) -> bool;

    /// Whether leaving the value out entirely is accepted; drives the
    /// `optional` marker in help output.
    fn accepts_undefined(&self, type_spec: &str) -> bool {
        self.accepts(type_spec, ValueKind::Undefined)
    }
}

/// Built-in validator for unions of primitive kinds.
///
/// Descriptors are `|`-separated atoms: `"number"`, `"boolean"`, `"bigint"`,
/// `"string"`, `"undefined"`, or combinations such as
/// `"number | undefined"`. Whitespace around atoms is ignored. An unknown
/// atom accepts nothing and shows up verbatim in descriptions, keeping
/// rejection messages self-describing.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{StandardValidator, Validator, Value, ValueKind};
///
/// let validator = StandardValidator;
/// assert_eq!(validator.describe("number"), "a number");
/// assert!(validator.accepts("number | undefined", ValueKind::Undefined));
///
/// let err = validator.validate("number", &Value::String("a".into())).unwrap_err();
/// assert_eq!(err.summary, "must be a number (was a string)");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidator;

fn atoms(type_spec: &str) -> impl Iterator<Item = &str> {
    type_spec.split('|').map(str::trim).filter(|atom| !atom.is_empty())
}

fn atom_kind(atom: &str) -> Option<ValueKind> {
    match atom {
        "string" => Some(ValueKind::String),
        "number" => Some(ValueKind::Number),
        "boolean" => Some(ValueKind::Boolean),
        "bigint" => Some(ValueKind::BigInt),
        "undefined" => Some(ValueKind::Undefined),
        _ => None,
    }
}

fn kind_label(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Undefined => "undefined",
        ValueKind::Boolean => "a boolean",
        ValueKind::Number => "a number",
        ValueKind::BigInt => "a bigint",
        ValueKind::String => "a string",
    }
}

impl Validator for StandardValidator {
    fn validate(&self, type_spec: &str, value: &Value) -> Result<Value, ValidationFailure> {
        if self.accepts(type_spec, value.kind()) {
            Ok(value.clone())
        } else {
            Err(ValidationFailure {
                summary: format!(
                    "must be {} (was {})",
                    self.describe(type_spec),
                    kind_label(value.kind())
                ),
            })
        }
    }

    fn describe(&self, type_spec: &str) -> String {
        let labels: Vec<&str> = atoms(type_spec)
            .map(|atom| atom_kind(atom).map(kind_label).unwrap_or(atom))
            .collect();
        if labels.is_empty() {
            "nothing".to_string()
        } else {
            labels.join(" or ")
        }
    }

    fn accepts(&self, type_spec: &str, kind: ValueKind) -> bool {
        atoms(type_spec).any(|atom| atom_kind(atom) == Some(kind))
    }
}
