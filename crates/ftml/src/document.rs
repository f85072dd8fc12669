//! The document handle returned by `load`.

use std::ops::{Deref, DerefMut};

use ftml_parse::DocumentNode;
use ftml_schema::ValidationError;
use ftml_tree::{Map, Value};

/// A loaded FTML document: the value map plus the commented AST.
///
/// The map is the primary view; the document derefs to it, so it reads and
/// mutates like an ordered map. The AST rides along as a side-channel and is
/// re-synced from the map at dump time, which is how comments survive a
/// load → mutate → dump cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtmlDocument {
    pub(crate) root: Map,
    pub(crate) ast: DocumentNode,
    pub(crate) validation_errors: Vec<ValidationError>,
}

impl FtmlDocument {
    /// Wrap a plain value map with an empty AST (no comments).
    pub fn from_map(root: Map) -> Self {
        Self {
            root,
            ast: DocumentNode::default(),
            validation_errors: Vec::new(),
        }
    }

    /// The root value map.
    pub fn as_map(&self) -> &Map {
        &self.root
    }

    /// Take the root value map, dropping the AST.
    pub fn into_map(self) -> Map {
        self.root
    }

    /// The commented AST backing this document.
    pub fn ast(&self) -> &DocumentNode {
        &self.ast
    }

    /// Validation errors collected by a permissive load (`validate: false`
    /// with a schema). Empty after a strict load.
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    /// Get a value by dotted path, e.g. `user.emails[0]`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        let (key, rest) = match path.find(['.', '[']) {
            Some(idx) if path.as_bytes()[idx] == b'.' => (&path[..idx], &path[idx + 1..]),
            Some(idx) => (&path[..idx], &path[idx..]),
            None => (path, ""),
        };
        let value = self.root.get(key)?;
        if rest.is_empty() { Some(value) } else { value.get(rest) }
    }
}

impl Deref for FtmlDocument {
    type Target = Map;

    fn deref(&self) -> &Map {
        &self.root
    }
}

impl DerefMut for FtmlDocument {
    fn deref_mut(&mut self) -> &mut Map {
        &mut self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_access() {
        let mut inner = Map::new();
        inner.insert("name".into(), Value::from("Alice"));
        inner.insert(
            "emails".into(),
            Value::List(vec![Value::from("a@example.com")]),
        );
        let mut root = Map::new();
        root.insert("user".into(), Value::Object(inner));
        let doc = FtmlDocument::from_map(root);

        assert_eq!(
            doc.get_path("user.name").and_then(|v| v.as_str()),
            Some("Alice")
        );
        assert_eq!(
            doc.get_path("user.emails[0]").and_then(|v| v.as_str()),
            Some("a@example.com")
        );
        assert_eq!(doc.get_path("missing"), None);
        assert_eq!(doc.get_path(""), None);
    }

    #[test]
    fn test_deref_to_map() {
        let mut doc = FtmlDocument::default();
        doc.insert("key".into(), Value::Int(1));
        assert_eq!(doc["key"], Value::Int(1));
        assert_eq!(doc.len(), 1);
    }
}
