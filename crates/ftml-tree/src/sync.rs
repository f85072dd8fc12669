//! Re-syncing a mutated value map back into a commented AST.
//!
//! The public API hands out the value map and keeps the AST as a
//! side-channel. Consumers mutate the map freely; at dump time the AST is
//! brought up to date here. Keys that survived keep their comments, keys
//! removed from the map lose their nodes, and new keys get fresh nodes
//! appended at the end.

use ftml_parse::{DocumentNode, KeyValueNode, ListNode, Node, ObjectNode, Scalar, ScalarNode};
use indexmap::map::Entry;

use crate::{Map, Value};

/// Sync a value map into an existing document AST in place.
pub fn sync_document(map: &Map, doc: &mut DocumentNode) {
    doc.items.retain(|key, _| map.contains_key(key));
    for (key, value) in map {
        match doc.items.entry(key.clone()) {
            Entry::Occupied(mut entry) => sync_node(value, &mut entry.get_mut().value),
            Entry::Vacant(entry) => {
                entry.insert(KeyValueNode::new(key.clone(), value_to_node(value)));
            }
        }
    }
}

/// Build a fresh document AST (no comments) from a value map.
pub fn map_to_document(map: &Map) -> DocumentNode {
    let mut doc = DocumentNode::default();
    for (key, value) in map {
        doc.items
            .insert(key.clone(), KeyValueNode::new(key.clone(), value_to_node(value)));
    }
    doc
}

/// Sync one value into an existing node, keeping comments where the shape
/// still matches. A shape change replaces the node wholesale; the pair-level
/// comments owned by the caller survive regardless.
fn sync_node(value: &Value, node: &mut Node) {
    match (value, node) {
        (Value::Object(map), Node::Object(obj)) => {
            obj.items.retain(|key, _| map.contains_key(key));
            for (key, value) in map {
                match obj.items.entry(key.clone()) {
                    Entry::Occupied(mut entry) => sync_node(value, &mut entry.get_mut().value),
                    Entry::Vacant(entry) => {
                        entry.insert(KeyValueNode::new(key.clone(), value_to_node(value)));
                    }
                }
            }
        }
        (Value::List(values), Node::List(list)) => {
            list.elements.truncate(values.len());
            for (i, value) in values.iter().enumerate() {
                if i < list.elements.len() {
                    sync_node(value, &mut list.elements[i]);
                } else {
                    list.elements.push(value_to_node(value));
                }
            }
        }
        (value, Node::Scalar(scalar)) if !value_is_container(value) => {
            scalar.value = value_to_scalar(value);
        }
        (value, node) => {
            *node = value_to_node(value);
        }
    }
}

fn value_is_container(value: &Value) -> bool {
    matches!(value, Value::List(_) | Value::Object(_))
}

/// Build a fresh comment-free node for a value.
pub fn value_to_node(value: &Value) -> Node {
    match value {
        Value::Object(map) => {
            let mut obj = ObjectNode::default();
            for (key, value) in map {
                obj.items
                    .insert(key.clone(), KeyValueNode::new(key.clone(), value_to_node(value)));
            }
            Node::Object(obj)
        }
        Value::List(values) => {
            let mut list = ListNode::default();
            list.elements = values.iter().map(value_to_node).collect();
            Node::List(list)
        }
        scalar => Node::Scalar(ScalarNode::new(value_to_scalar(scalar))),
    }
}

/// Render a non-container value as a raw AST scalar.
///
/// Coerced date/time values go back to their canonical string forms;
/// timestamps go back to integers.
pub fn value_to_scalar(value: &Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Int(i) => Scalar::Int(*i),
        Value::Float(f) => Scalar::Float(*f),
        Value::String(s) => Scalar::String(s.clone()),
        Value::Date(d) => Scalar::String(d.format("%Y-%m-%d").to_string()),
        Value::Time(t) => Scalar::String(t.format("%H:%M:%S").to_string()),
        Value::DateTime(dt) => Scalar::String(dt.to_rfc3339()),
        Value::Timestamp(ts) => Scalar::Int(*ts),
        Value::List(_) | Value::Object(_) => {
            unreachable!("containers are handled by value_to_node")
        }
    }
}
