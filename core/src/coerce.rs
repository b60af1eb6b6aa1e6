//! Best-effort conversion of raw string tokens into native-typed values.
//!
//! Coercion runs before formal validation: it looks at what the declared
//! type is willing to accept and tries to hand the validator a value of
//! that shape. It never fails on its own; a conversion that goes wrong
//! leaves the raw string in place and lets the validator produce the
//! user-facing rejection.

use tracing::debug;

use crate::types::{Value, ValueKind};
use crate::validate::{ValidationFailure, Validator};

/// Coerces a raw token value and runs it through the validator.
///
/// `raw` is the token text, if any; `flag_present` is true when the value
/// comes from an option whose token appeared without an inline value (bare
/// flag presence means `true` for boolean-accepting options; positional
/// arguments have no such fallback).
///
/// Conversion policy, in order:
/// 1. no raw value, boolean accepted, bare flag present: `true`;
/// 2. boolean accepted: case-insensitive allow-list, `"true"`/`"1"`/`"on"`
///    map to true and anything else to false;
/// 3. number accepted: numeric parse, falling back to the raw string when
///    the parse fails or yields NaN so the validator reports the string it
///    was given;
/// 4. bigint accepted: integer parse, a failure is swallowed (debug trace
///    only) and the raw string flows on to fail validation downstream;
/// 5. otherwise the raw string passes through unchanged.
///
/// The validator is always the final gate.
pub fn coerce(
    raw: Option<&str>,
    flag_present: bool,
    type_spec: &str,
    validator: &dyn Validator,
) -> Result<Value, ValidationFailure> {
    let candidate = convert(raw, flag_present, type_spec, validator);
    validator.validate(type_spec, &candidate)
}

fn convert(
    raw: Option<&str>,
    flag_present: bool,
    type_spec: &str,
    validator: &dyn Validator,
) -> Value {
    let Some(raw) = raw else {
        if flag_present && validator.accepts(type_spec, ValueKind::Boolean) {
            return Value::Bool(true);
        }
        return Value::Undefined;
    };

    if validator.accepts(type_spec, ValueKind::Boolean) {
        let truthy = matches!(raw.to_lowercase().as_str(), "true" | "1" | "on");
        return Value::Bool(truthy);
    }

    if validator.accepts(type_spec, ValueKind::Number) {
        return match raw.parse::<f64>() {
            // The literal "NaN" parses, but a not-a-number value is no use
            // to a handler; treat it like any other failed conversion.
            Ok(number) if !number.is_nan() => Value::Number(number),
            // Not a number: keep the raw string so the rejection says what
            // was actually given.
            _ => Value::String(raw.to_string()),
        };
    }

    if validator.accepts(type_spec, ValueKind::BigInt) {
        return match raw.parse::<i128>() {
            Ok(number) => Value::BigInt(number),
            Err(error) => {
                debug!(raw, %error, "big-integer conversion failed, keeping raw string");
                Value::String(raw.to_string())
            }
        };
    }

    Value::String(raw.to_string())
}
