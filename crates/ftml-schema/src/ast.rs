//! Schema type tree.

use ftml_tree::Value;
use indexmap::IndexMap;

/// Constraint arguments as parsed: constraint name to literal value.
pub type Constraints = IndexMap<String, Value>;

/// One type in a schema.
///
/// Unions are flattened at construction: no union's subtype is itself a
/// union. Defaults and optionality live on the outermost node of a
/// declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Scalar(ScalarType),
    List(ListType),
    Object(ObjectType),
    Union(UnionType),
}

/// A scalar type such as `str`, `int<min=0>`, or `date<format="%d.%m.%Y">`.
///
/// String-literal singletons (`"active"`) parse as `str` with a one-element
/// `enum` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    /// One of `str`, `int`, `float`, `bool`, `null`, `any`, `date`, `time`,
    /// `datetime`, `timestamp`.
    pub type_name: String,
    pub constraints: Constraints,
    pub default: Option<Value>,
    pub optional: bool,
}

impl ScalarType {
    /// Create a bare scalar type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            constraints: Constraints::new(),
            default: None,
            optional: false,
        }
    }
}

/// A list type `[T]` or untyped `[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListType {
    /// The element type; `None` means any element is accepted.
    pub item_type: Option<Box<TypeNode>>,
    pub constraints: Constraints,
    pub default: Option<Value>,
    pub optional: bool,
}

/// An object type: structured `{a: T, ...}`, pattern `{T}`, or untyped `{}`.
///
/// The three forms are mutually exclusive: a structured object has `fields`,
/// a pattern object has `pattern_value_type`, an untyped object has neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub fields: IndexMap<String, TypeNode>,
    pub pattern_value_type: Option<Box<TypeNode>>,
    /// Allow unknown fields even in strict mode (`<ext=true>`).
    pub ext: bool,
    pub constraints: Constraints,
    pub default: Option<Value>,
    pub optional: bool,
}

impl ObjectType {
    /// Whether this is the untyped `{}` form.
    pub fn is_untyped(&self) -> bool {
        self.fields.is_empty() && self.pattern_value_type.is_none()
    }
}

/// A union of subtypes, e.g. `str | int | null`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub subtypes: Vec<TypeNode>,
    pub default: Option<Value>,
    pub optional: bool,
}

impl TypeNode {
    /// The default value, if declared.
    pub fn default(&self) -> Option<&Value> {
        match self {
            TypeNode::Scalar(t) => t.default.as_ref(),
            TypeNode::List(t) => t.default.as_ref(),
            TypeNode::Object(t) => t.default.as_ref(),
            TypeNode::Union(t) => t.default.as_ref(),
        }
    }

    /// Whether a default was declared.
    pub fn has_default(&self) -> bool {
        self.default().is_some()
    }

    /// Whether the field is optional (`name?:`).
    pub fn optional(&self) -> bool {
        match self {
            TypeNode::Scalar(t) => t.optional,
            TypeNode::List(t) => t.optional,
            TypeNode::Object(t) => t.optional,
            TypeNode::Union(t) => t.optional,
        }
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        match self {
            TypeNode::Scalar(t) => t.default = Some(value),
            TypeNode::List(t) => t.default = Some(value),
            TypeNode::Object(t) => t.default = Some(value),
            TypeNode::Union(t) => t.default = Some(value),
        }
    }

    pub(crate) fn set_optional(&mut self) {
        match self {
            TypeNode::Scalar(t) => t.optional = true,
            TypeNode::List(t) => t.optional = true,
            TypeNode::Object(t) => t.optional = true,
            TypeNode::Union(t) => t.optional = true,
        }
    }

    /// Constraints declared on this node. Unions carry none themselves.
    pub fn constraints(&self) -> Option<&Constraints> {
        match self {
            TypeNode::Scalar(t) => Some(&t.constraints),
            TypeNode::List(t) => Some(&t.constraints),
            TypeNode::Object(t) => Some(&t.constraints),
            TypeNode::Union(_) => None,
        }
    }

    /// Short description of the type for error messages.
    pub fn describe(&self) -> String {
        match self {
            TypeNode::Scalar(t) => t.type_name.clone(),
            TypeNode::List(t) => match &t.item_type {
                Some(item) => format!("[{}]", item.describe()),
                None => "[]".to_string(),
            },
            TypeNode::Object(t) => {
                if let Some(pattern) = &t.pattern_value_type {
                    format!("{{{}}}", pattern.describe())
                } else if t.is_untyped() {
                    "{}".to_string()
                } else {
                    "object".to_string()
                }
            }
            TypeNode::Union(t) => t
                .subtypes
                .iter()
                .map(TypeNode::describe)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}
