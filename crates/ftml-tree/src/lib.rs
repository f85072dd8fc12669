//! Runtime value tree for FTML documents.
//!
//! This crate provides the plain data view of a document: an
//! insertion-ordered map of [`Value`]s, lowered from the commented AST and
//! re-synced back into it at dump time so comments survive mutation.

mod value;
pub use value::{Map, Value};

mod builder;
pub use builder::{document_to_map, node_to_value, scalar_to_value};

mod sync;
pub use sync::{map_to_document, sync_document, value_to_node, value_to_scalar};
