//! Default application.
//!
//! Runs after validation (or instead of it, for permissive loads). The
//! precedence is: existing value > field default > enclosing container
//! default > nothing. Absent containers are never synthesized just because
//! their fields have defaults; only a default on the container itself puts
//! one there.

use ftml_tree::{Map, Value};
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::Schema;
use crate::ast::TypeNode;
use crate::validator::validate_one;

/// Fill missing fields of `data` from the schema's defaults, in place.
///
/// Idempotent: applying twice changes nothing the first pass didn't.
pub fn apply_defaults(data: &mut Map, schema: &Schema) {
    apply_field_defaults(data, &schema.fields);
}

fn apply_field_defaults(map: &mut Map, fields: &IndexMap<String, TypeNode>) {
    for (name, ty) in fields {
        match map.entry(name.clone()) {
            Entry::Occupied(mut entry) => descend(entry.get_mut(), ty),
            Entry::Vacant(entry) => {
                if let Some(default) = ty.default() {
                    let mut value = default.clone();
                    // A container default may leave gaps that per-field
                    // defaults fill; keys the container default sets win.
                    descend(&mut value, ty);
                    entry.insert(value);
                }
            }
        }
    }
}

/// Recurse into a present value to fill nested defaults.
fn descend(value: &mut Value, ty: &TypeNode) {
    match ty {
        TypeNode::Scalar(_) => {}
        TypeNode::List(t) => {
            if let Some(item_ty) = &t.item_type
                && let Value::List(items) = value
            {
                for item in items {
                    descend(item, item_ty);
                }
            }
        }
        TypeNode::Object(t) => {
            if let Value::Object(map) = value {
                if let Some(pattern) = &t.pattern_value_type {
                    for (_, item) in map.iter_mut() {
                        descend(item, pattern);
                    }
                } else if !t.fields.is_empty() {
                    apply_field_defaults(map, &t.fields);
                }
            }
        }
        TypeNode::Union(t) => {
            let matching = t
                .subtypes
                .iter()
                .find(|sub| validate_one(value, sub, "", true).is_empty());
            if let Some(sub) = matching {
                descend(value, sub);
            }
        }
    }
}
