//! Schema-driven coercion of raw values into typed ones.
//!
//! Only date, time, datetime, and timestamp types coerce; everything else
//! passes through untouched. Without a schema this never runs, so dates
//! stay strings and timestamps stay integers.

use ftml_tree::{Map, Value};
use indexmap::IndexMap;

use crate::Schema;
use crate::ast::TypeNode;
use crate::datetime::coerce_value;
use crate::validator::validate_one;

/// Coerce the values of `data` according to the schema, in place.
///
/// Runs after validation; values that would fail to coerce have already
/// been reported, so failures here simply leave the raw value alone.
pub fn apply_coercion(data: &mut Map, schema: &Schema) {
    coerce_fields(data, &schema.fields);
}

fn coerce_fields(map: &mut Map, fields: &IndexMap<String, TypeNode>) {
    for (name, ty) in fields {
        if let Some(value) = map.get_mut(name) {
            coerce_node(value, ty);
        }
    }
}

fn coerce_node(value: &mut Value, ty: &TypeNode) {
    match ty {
        TypeNode::Scalar(t) => {
            if let Some(coerced) = coerce_value(value, t) {
                *value = coerced;
            }
        }
        TypeNode::List(t) => {
            if let Some(item_ty) = &t.item_type
                && let Value::List(items) = value
            {
                for item in items {
                    coerce_node(item, item_ty);
                }
            }
        }
        TypeNode::Object(t) => {
            if let Value::Object(map) = value {
                if let Some(pattern) = &t.pattern_value_type {
                    for (_, item) in map.iter_mut() {
                        coerce_node(item, pattern);
                    }
                } else if !t.fields.is_empty() {
                    coerce_fields(map, &t.fields);
                }
            }
        }
        TypeNode::Union(t) => {
            // Coerce with the subtype that matched; failed arms must not
            // leave half-coerced values behind.
            let matching = t
                .subtypes
                .iter()
                .find(|sub| validate_one(value, sub, "", true).is_empty());
            if let Some(sub) = matching {
                coerce_node(value, sub);
            }
        }
    }
}
