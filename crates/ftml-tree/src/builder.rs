//! Lowering from the commented AST to plain values.

use ftml_parse::{DocumentNode, Node, Scalar};

use crate::{Map, Value};

/// Lower a parsed document to its value map, dropping comments.
pub fn document_to_map(doc: &DocumentNode) -> Map {
    let mut map = Map::new();
    for (key, kv) in &doc.items {
        map.insert(key.clone(), node_to_value(&kv.value));
    }
    map
}

/// Lower one AST node to a value.
pub fn node_to_value(node: &Node) -> Value {
    match node {
        Node::Scalar(s) => scalar_to_value(&s.value),
        Node::Object(obj) => {
            let mut map = Map::new();
            for (key, kv) in &obj.items {
                map.insert(key.clone(), node_to_value(&kv.value));
            }
            Value::Object(map)
        }
        Node::List(list) => Value::List(list.elements.iter().map(node_to_value).collect()),
    }
}

/// Lower a raw scalar literal to a value.
pub fn scalar_to_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Int(i) => Value::Int(*i),
        Scalar::Float(f) => Value::Float(*f),
        Scalar::String(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lowering_preserves_order_and_shape() {
        let doc = ftml_parse::parse(
            "name = \"John\"\nage = 30\ntags = [\"a\", \"b\"]\nnested = { x = 1.5, flag = true }\n",
        )
        .unwrap();
        let map = document_to_map(&doc);

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "age", "tags", "nested"]);

        assert_eq!(map["name"], Value::from("John"));
        assert_eq!(map["age"], Value::Int(30));
        assert_eq!(
            map["tags"],
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        let nested = map["nested"].as_object().unwrap();
        assert_eq!(nested["x"], Value::Float(1.5));
        assert_eq!(nested["flag"], Value::Bool(true));
    }
}
