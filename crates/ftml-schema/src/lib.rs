//! Schema parsing, validation, and default application for FTML.
//!
//! A schema is a newline-separated list of field declarations:
//!
//! ```text
//! name: str<min_length=1, max_length=100>
//! age: int<min=0> = 18
//! status: str<enum=["active", "inactive"]> | null = null
//! address: {
//!     street: str,
//!     zip: str<pattern="[0-9]{5}">
//! }
//! ```
//!
//! Parsing produces a type tree; validation walks value × type in lockstep
//! collecting errors; default application fills absent fields afterwards.

use indexmap::IndexMap;

mod ast;
pub use ast::{Constraints, ListType, ObjectType, ScalarType, TypeNode, UnionType};

mod error;
pub use error::{SchemaError, ValidationError};

mod parser;
pub use parser::SchemaParser;

mod constraints;

mod datetime;
pub use datetime::{
    TimestampPrecision, coerce_value, validate_date, validate_datetime, validate_time,
    validate_timestamp,
};

mod validator;
pub use validator::SchemaValidator;

mod defaults;
pub use defaults::apply_defaults;

mod coerce;
pub use coerce::apply_coercion;

/// A parsed schema: an ordered set of typed root fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Root field declarations in source order.
    pub fields: IndexMap<String, TypeNode>,
}

impl Schema {
    /// Parse a schema expression.
    pub fn parse(source: &str) -> Result<Self, SchemaError> {
        let fields = SchemaParser::new(source)?.parse_schema()?;
        Ok(Self { fields })
    }

    /// Validate a value map against this schema in strict mode.
    pub fn validate(&self, data: &ftml_tree::Map) -> Vec<ValidationError> {
        SchemaValidator::new(self).validate(data)
    }
}
