//! Constraint applicability and typed accessors.
//!
//! Constraints are stored as parsed literals; the applicability table is
//! enforced once at schema-parse time so the validator can assume
//! well-formed constraint values.

use ftml_tree::Value;

use crate::ast::{Constraints, TypeNode};
use crate::datetime::TimestampPrecision;

/// Check that every constraint on the node is known and applicable to its
/// type and that the constraint value has the right shape.
pub(crate) fn check_applicability(node: &TypeNode) -> Result<(), String> {
    match node {
        TypeNode::Scalar(t) => check_scalar(&t.type_name, &t.constraints),
        TypeNode::List(t) => check_count_bounds("list", &t.constraints),
        TypeNode::Object(t) => check_count_bounds("object", &t.constraints),
        TypeNode::Union(_) => Ok(()),
    }
}

fn check_scalar(type_name: &str, constraints: &Constraints) -> Result<(), String> {
    for (name, value) in constraints {
        let ok = match (type_name, name.as_str()) {
            ("str", "min_length") | ("str", "max_length") => require_count(name, value)?,
            ("str", "pattern") => {
                let pattern = require_str(name, value)?;
                regex::Regex::new(pattern)
                    .map_err(|e| format!("Invalid pattern regex: {e}"))?;
                true
            }
            ("str", "enum") | ("any", "enum") => require_list(name, value)?,
            ("int", "min") | ("int", "max") => require_int(name, value)?,
            ("float", "min") | ("float", "max") => require_number(name, value)?,
            ("float", "precision") => require_count(name, value)?,
            ("date", "format") | ("time", "format") | ("datetime", "format") => {
                require_str(name, value)?;
                true
            }
            ("date", "min") | ("date", "max")
            | ("time", "min") | ("time", "max")
            | ("datetime", "min") | ("datetime", "max") => {
                require_str(name, value)?;
                true
            }
            ("timestamp", "precision") => {
                let s = require_str(name, value)?;
                s.parse::<TimestampPrecision>()
                    .map_err(|e| format!("Invalid constraint 'precision': {e}"))?;
                true
            }
            ("timestamp", "min") | ("timestamp", "max") => require_int(name, value)?,
            _ => {
                return Err(format!(
                    "Constraint '{name}' is not applicable to type '{type_name}'"
                ));
            }
        };
        debug_assert!(ok);
    }
    Ok(())
}

fn check_count_bounds(type_name: &str, constraints: &Constraints) -> Result<(), String> {
    for (name, value) in constraints {
        match name.as_str() {
            "min" | "max" => {
                require_count(name, value)?;
            }
            _ => {
                return Err(format!(
                    "Constraint '{name}' is not applicable to type '{type_name}'"
                ));
            }
        }
    }
    Ok(())
}

fn require_int(name: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::Int(_) => Ok(true),
        other => Err(format!(
            "Constraint '{name}' must be an integer, got {}",
            other.type_name()
        )),
    }
}

fn require_count(name: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::Int(i) if *i >= 0 => Ok(true),
        Value::Int(_) => Err(format!("Constraint '{name}' must be non-negative")),
        other => Err(format!(
            "Constraint '{name}' must be an integer, got {}",
            other.type_name()
        )),
    }
}

fn require_number(name: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::Int(_) | Value::Float(_) => Ok(true),
        other => Err(format!(
            "Constraint '{name}' must be a number, got {}",
            other.type_name()
        )),
    }
}

fn require_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(format!(
            "Constraint '{name}' must be a string, got {}",
            other.type_name()
        )),
    }
}

fn require_list(name: &str, value: &Value) -> Result<bool, String> {
    match value {
        Value::List(_) => Ok(true),
        other => Err(format!(
            "Constraint '{name}' must be a list, got {}",
            other.type_name()
        )),
    }
}

// Typed accessors used by the validator; applicability has already vetted
// the value shapes.

pub(crate) fn int(constraints: &Constraints, key: &str) -> Option<i64> {
    match constraints.get(key) {
        Some(Value::Int(i)) => Some(*i),
        _ => None,
    }
}

pub(crate) fn number(constraints: &Constraints, key: &str) -> Option<f64> {
    match constraints.get(key) {
        Some(Value::Int(i)) => Some(*i as f64),
        Some(Value::Float(f)) => Some(*f),
        _ => None,
    }
}

pub(crate) fn string<'a>(constraints: &'a Constraints, key: &str) -> Option<&'a str> {
    match constraints.get(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

pub(crate) fn list<'a>(constraints: &'a Constraints, key: &str) -> Option<&'a [Value]> {
    match constraints.get(key) {
        Some(Value::List(items)) => Some(items),
        _ => None,
    }
}
