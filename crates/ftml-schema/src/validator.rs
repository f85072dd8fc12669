//! Validator: walks value × type in lockstep, collecting errors.
//!
//! Validation never raises on first failure; a run returns every error so
//! callers can report them all at once. Paths use `parent.child[index]`
//! notation.

use ftml_tree::{Map, Value};
use indexmap::IndexMap;

use crate::Schema;
use crate::ast::{ListType, ObjectType, ScalarType, TypeNode};
use crate::constraints;
use crate::datetime::{
    self, validate_date, validate_datetime, validate_time, validate_timestamp,
};
use crate::error::ValidationError;

/// Top-level keys the engine interprets itself; they never count as unknown
/// fields, even in strict mode.
pub(crate) const RESERVED_KEYS: &[&str] = &["ftml_version", "ftml_encoding"];

/// Validator for value maps against a parsed schema.
pub struct SchemaValidator<'a> {
    fields: &'a IndexMap<String, TypeNode>,
    strict: bool,
}

impl<'a> SchemaValidator<'a> {
    /// Create a strict validator (unknown fields are errors unless a type
    /// opts out with `ext=true`).
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_strict(schema, true)
    }

    /// Create a validator with explicit strictness. `strict=false` accepts
    /// unknown fields everywhere.
    pub fn with_strict(schema: &'a Schema, strict: bool) -> Self {
        Self {
            fields: &schema.fields,
            strict,
        }
    }

    /// Validate a document's value map. Returns all errors found.
    pub fn validate(&self, data: &Map) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        validate_struct_fields(data, self.fields, "", false, self.strict, true, &mut errors);
        errors
    }
}

/// Validate a single value against a type, returning collected errors.
/// Used for union resolution and schema-default checking as well.
pub(crate) fn validate_one(
    value: &Value,
    ty: &TypeNode,
    path: &str,
    strict: bool,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_value(value, ty, path, strict, &mut errors);
    errors
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        path,
        format!(
            "Type mismatch at '{path}': expected {expected}, got {}",
            value.type_name()
        ),
    )
}

fn validate_value(
    value: &Value,
    ty: &TypeNode,
    path: &str,
    strict: bool,
    errors: &mut Vec<ValidationError>,
) {
    match ty {
        TypeNode::Scalar(t) => validate_scalar(value, t, path, errors),
        TypeNode::List(t) => validate_list(value, t, path, strict, errors),
        TypeNode::Object(t) => validate_object(value, t, path, strict, errors),
        TypeNode::Union(t) => {
            // Try each subtype in declaration order; first clean match wins.
            // Inner attempts never leak partial errors, only the composite.
            for sub in &t.subtypes {
                if validate_one(value, sub, path, strict).is_empty() {
                    return;
                }
            }
            let message = if path.is_empty() {
                "Value does not match any allowed types".to_string()
            } else {
                format!("{path} does not match any allowed types")
            };
            errors.push(ValidationError::new(path, message));
        }
    }
}

fn validate_scalar(value: &Value, t: &ScalarType, path: &str, errors: &mut Vec<ValidationError>) {
    let c = &t.constraints;
    match t.type_name.as_str() {
        "any" => {
            if let Some(allowed) = constraints::list(c, "enum")
                && !allowed.contains(value)
            {
                errors.push(enum_error(path, allowed));
            }
        }
        "str" => {
            let Value::String(s) = value else {
                errors.push(mismatch(path, "str", value));
                return;
            };
            let len = s.chars().count() as i64;
            if let Some(min) = constraints::int(c, "min_length")
                && len < min
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' is too short: length {len} is less than min_length {min}"),
                ));
                return;
            }
            if let Some(max) = constraints::int(c, "max_length")
                && len > max
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' is too long: length {len} exceeds max_length {max}"),
                ));
                return;
            }
            if let Some(pattern) = constraints::string(c, "pattern")
                && let Ok(re) = regex::Regex::new(pattern)
                && !re.is_match(s)
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' does not match pattern '{pattern}'"),
                ));
                return;
            }
            if let Some(allowed) = constraints::list(c, "enum")
                && !allowed.contains(value)
            {
                errors.push(enum_error(path, allowed));
            }
        }
        "int" => {
            let Value::Int(i) = value else {
                errors.push(mismatch(path, "int", value));
                return;
            };
            if let Some(min) = constraints::int(c, "min")
                && *i < min
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' is too small: {i} is less than min {min}"),
                ));
                return;
            }
            if let Some(max) = constraints::int(c, "max")
                && *i > max
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' is too large: {i} exceeds max {max}"),
                ));
            }
        }
        "float" => {
            let Value::Float(f) = value else {
                errors.push(mismatch(path, "float", value));
                return;
            };
            if let Some(min) = constraints::number(c, "min")
                && *f < min
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' is too small: {f} is less than min {min}"),
                ));
                return;
            }
            if let Some(max) = constraints::number(c, "max")
                && *f > max
            {
                errors.push(ValidationError::new(
                    path,
                    format!("Value for '{path}' is too large: {f} exceeds max {max}"),
                ));
                return;
            }
            if let Some(precision) = constraints::int(c, "precision") {
                let repr = format!("{f}");
                let decimals = repr.split('.').nth(1).map_or(0, str::len) as i64;
                if decimals > precision {
                    errors.push(ValidationError::new(
                        path,
                        format!(
                            "Value for '{path}' has too many decimal places: {decimals} exceeds precision {precision}"
                        ),
                    ));
                }
            }
        }
        "bool" => {
            if !matches!(value, Value::Bool(_)) {
                errors.push(mismatch(path, "bool", value));
            }
        }
        "null" => {
            if !value.is_null() {
                errors.push(mismatch(path, "null", value));
            }
        }
        "date" => validate_date_value(value, t, path, errors),
        "time" => validate_time_value(value, t, path, errors),
        "datetime" => validate_datetime_value(value, t, path, errors),
        "timestamp" => validate_timestamp_value(value, t, path, errors),
        other => {
            debug_assert!(false, "unknown scalar type '{other}' escaped schema parsing");
            errors.push(mismatch(path, other, value));
        }
    }
}

fn enum_error(path: &str, allowed: &[Value]) -> ValidationError {
    let rendered: Vec<String> = allowed.iter().map(render_literal).collect();
    ValidationError::new(
        path,
        format!(
            "Value for '{path}' is not in allowed values: [{}]",
            rendered.join(", ")
        ),
    )
}

fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        other => other.type_name().to_string(),
    }
}

fn validate_date_value(
    value: &Value,
    t: &ScalarType,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let format = constraints::string(&t.constraints, "format");
    let parsed = match value {
        Value::Date(d) => *d,
        Value::String(s) => match validate_date(s, format) {
            Ok(d) => d,
            Err(detail) => {
                errors.push(ValidationError::new(path, format!("{detail} at '{path}'")));
                return;
            }
        },
        other => {
            errors.push(mismatch(path, "date", other));
            return;
        }
    };

    if let Some(min_s) = constraints::string(&t.constraints, "min")
        && let Ok(min) = validate_date(min_s, format)
        && parsed < min
    {
        errors.push(ValidationError::new(
            path,
            format!("Date for '{path}' is before minimum date {min_s}"),
        ));
        return;
    }
    if let Some(max_s) = constraints::string(&t.constraints, "max")
        && let Ok(max) = validate_date(max_s, format)
        && parsed > max
    {
        errors.push(ValidationError::new(
            path,
            format!("Date for '{path}' is after maximum date {max_s}"),
        ));
    }
}

fn validate_time_value(
    value: &Value,
    t: &ScalarType,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let format = constraints::string(&t.constraints, "format");
    let parsed = match value {
        Value::Time(tv) => *tv,
        Value::String(s) => match validate_time(s, format) {
            Ok(tv) => tv,
            Err(detail) => {
                errors.push(ValidationError::new(path, format!("{detail} at '{path}'")));
                return;
            }
        },
        other => {
            errors.push(mismatch(path, "time", other));
            return;
        }
    };

    if let Some(min_s) = constraints::string(&t.constraints, "min")
        && let Ok(min) = validate_time(min_s, format)
        && parsed < min
    {
        errors.push(ValidationError::new(
            path,
            format!("Time for '{path}' is before minimum time {min_s}"),
        ));
        return;
    }
    if let Some(max_s) = constraints::string(&t.constraints, "max")
        && let Ok(max) = validate_time(max_s, format)
        && parsed > max
    {
        errors.push(ValidationError::new(
            path,
            format!("Time for '{path}' is after maximum time {max_s}"),
        ));
    }
}

fn validate_datetime_value(
    value: &Value,
    t: &ScalarType,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let format = constraints::string(&t.constraints, "format");
    let parsed = match value {
        Value::DateTime(dt) => *dt,
        Value::String(s) => match validate_datetime(s, format) {
            Ok(dt) => dt,
            Err(detail) => {
                errors.push(ValidationError::new(path, format!("{detail} at '{path}'")));
                return;
            }
        },
        other => {
            errors.push(mismatch(path, "datetime", other));
            return;
        }
    };

    if let Some(min_s) = constraints::string(&t.constraints, "min")
        && let Ok(min) = validate_datetime(min_s, format)
        && parsed < min
    {
        errors.push(ValidationError::new(
            path,
            format!("Datetime for '{path}' is before minimum date {min_s}"),
        ));
        return;
    }
    if let Some(max_s) = constraints::string(&t.constraints, "max")
        && let Ok(max) = validate_datetime(max_s, format)
        && parsed > max
    {
        errors.push(ValidationError::new(
            path,
            format!("Datetime for '{path}' is after maximum date {max_s}"),
        ));
    }
}

fn validate_timestamp_value(
    value: &Value,
    t: &ScalarType,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let ts = match value {
        Value::Int(i) => *i,
        Value::Timestamp(i) => *i,
        other => {
            errors.push(mismatch(path, "timestamp", other));
            return;
        }
    };

    let precision = datetime::timestamp_precision(t);
    if let Err(detail) = validate_timestamp(ts, precision) {
        errors.push(ValidationError::new(path, format!("{detail} at '{path}'")));
        return;
    }
    if let Some(min) = constraints::int(&t.constraints, "min")
        && ts < min
    {
        errors.push(ValidationError::new(
            path,
            format!("Value for '{path}' is too small: {ts} is less than min {min}"),
        ));
        return;
    }
    if let Some(max) = constraints::int(&t.constraints, "max")
        && ts > max
    {
        errors.push(ValidationError::new(
            path,
            format!("Value for '{path}' is too large: {ts} exceeds max {max}"),
        ));
    }
}

fn validate_list(
    value: &Value,
    t: &ListType,
    path: &str,
    strict: bool,
    errors: &mut Vec<ValidationError>,
) {
    let Value::List(items) = value else {
        errors.push(mismatch(path, "list", value));
        return;
    };

    let count = items.len() as i64;
    if let Some(min) = constraints::int(&t.constraints, "min")
        && count < min
    {
        errors.push(ValidationError::new(
            path,
            format!("List '{path}' is too short: {count} elements, min is {min}"),
        ));
    } else if let Some(max) = constraints::int(&t.constraints, "max")
        && count > max
    {
        errors.push(ValidationError::new(
            path,
            format!("List '{path}' has too many elements: {count}, max is {max}"),
        ));
    }

    if let Some(item_ty) = &t.item_type {
        for (i, item) in items.iter().enumerate() {
            validate_value(item, item_ty, &format!("{path}[{i}]"), strict, errors);
        }
    }
}

fn validate_object(
    value: &Value,
    t: &ObjectType,
    path: &str,
    strict: bool,
    errors: &mut Vec<ValidationError>,
) {
    let Value::Object(map) = value else {
        errors.push(mismatch(path, "object", value));
        return;
    };

    let count = map.len() as i64;
    if let Some(min) = constraints::int(&t.constraints, "min")
        && count < min
    {
        errors.push(ValidationError::new(
            path,
            format!("Object '{path}' has too few keys: {count}, min is {min}"),
        ));
    } else if let Some(max) = constraints::int(&t.constraints, "max")
        && count > max
    {
        errors.push(ValidationError::new(
            path,
            format!("Object '{path}' has too many keys: {count}, max is {max}"),
        ));
    }

    if let Some(pattern) = &t.pattern_value_type {
        for (key, value) in map {
            validate_value(value, pattern, &join(path, key), strict, errors);
        }
    } else if !t.fields.is_empty() {
        validate_struct_fields(map, &t.fields, path, t.ext, strict, false, errors);
    }
    // Untyped objects accept anything; only the count bounds above apply.
}

/// Validate a map against declared fields: required/optional handling plus
/// the unknown-field check.
fn validate_struct_fields(
    map: &Map,
    fields: &IndexMap<String, TypeNode>,
    path: &str,
    ext: bool,
    strict: bool,
    is_root: bool,
    errors: &mut Vec<ValidationError>,
) {
    for (name, ty) in fields {
        let child = join(path, name);
        match map.get(name) {
            Some(value) => validate_value(value, ty, &child, strict, errors),
            None => {
                // Missing is fine when the field is optional or a default
                // will fill it in later.
                if !ty.optional() && !ty.has_default() {
                    errors.push(ValidationError::new(
                        &child,
                        format!("Missing required field: {child}"),
                    ));
                }
            }
        }
    }

    if strict && !ext {
        let unknown: Vec<&str> = map
            .keys()
            .filter(|key| !fields.contains_key(key.as_str()))
            .filter(|key| !(is_root && RESERVED_KEYS.contains(&key.as_str())))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            let message = if path.is_empty() {
                format!("Document contains unknown fields: {}", unknown.join(", "))
            } else {
                format!(
                    "Object '{path}' contains unknown fields: {}",
                    unknown.join(", ")
                )
            };
            errors.push(ValidationError::new(path, message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;

    fn map_of(pairs: &[(&str, Value)]) -> Map {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn validate(schema: &str, data: Map) -> Vec<ValidationError> {
        let schema = Schema::parse(schema).expect("schema should parse");
        SchemaValidator::new(&schema).validate(&data)
    }

    #[test]
    fn test_type_matching() {
        let errors = validate(
            "name: str\nage: int\nscore: float\nactive: bool\nnothing: null\n",
            map_of(&[
                ("name", Value::from("Alice")),
                ("age", Value::Int(30)),
                ("score", Value::Float(9.5)),
                ("active", Value::Bool(true)),
                ("nothing", Value::Null),
            ]),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_type_mismatches_collected() {
        let errors = validate(
            "name: str\nage: int\n",
            map_of(&[("name", Value::Int(5)), ("age", Value::from("old"))]),
        );
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("Type mismatch"));
        assert_eq!(errors[0].path, "name");
        assert_eq!(errors[1].path, "age");
    }

    #[test]
    fn test_missing_required_field() {
        let errors = validate("name: str\n", Map::new());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Missing required field: name"));
    }

    #[test]
    fn test_optional_and_defaulted_fields_may_be_missing() {
        let errors = validate("nickname?: str\ncount: int = 0\n", Map::new());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_string_constraints() {
        let schema = "username: str<min_length=3, max_length=10>\n";
        assert!(validate(schema, map_of(&[("username", Value::from("bob"))])).is_empty());

        let errors = validate(schema, map_of(&[("username", Value::from("ab"))]));
        assert!(errors[0].message.contains("too short"), "{errors:?}");

        let errors = validate(schema, map_of(&[("username", Value::from("verylongusername"))]));
        assert!(errors[0].message.contains("too long"), "{errors:?}");
    }

    #[test]
    fn test_pattern_constraint() {
        let schema = "zip: str<pattern=\"^[0-9]{5}$\">\n";
        assert!(validate(schema, map_of(&[("zip", Value::from("12345"))])).is_empty());

        let errors = validate(schema, map_of(&[("zip", Value::from("1234"))]));
        assert!(errors[0].message.contains("pattern"), "{errors:?}");
    }

    #[test]
    fn test_enum_constraint() {
        let schema = "color: str<enum=[\"red\", \"green\", \"blue\"]>\n";
        assert!(validate(schema, map_of(&[("color", Value::from("red"))])).is_empty());

        let errors = validate(schema, map_of(&[("color", Value::from("mauve"))]));
        assert!(errors[0].message.contains("not in allowed values"), "{errors:?}");
    }

    #[test]
    fn test_numeric_bounds() {
        let schema = "age: int<min=0, max=120>\n";
        let errors = validate(schema, map_of(&[("age", Value::Int(150))]));
        assert!(errors[0].message.contains("too large"), "{errors:?}");

        let errors = validate(schema, map_of(&[("age", Value::Int(-1))]));
        assert!(errors[0].message.contains("too small"), "{errors:?}");
    }

    #[test]
    fn test_float_precision() {
        let schema = "price: float<precision=2>\n";
        assert!(validate(schema, map_of(&[("price", Value::Float(9.99))])).is_empty());

        let errors = validate(schema, map_of(&[("price", Value::Float(9.999))]));
        assert!(errors[0].message.contains("decimal places"), "{errors:?}");
    }

    #[test]
    fn test_list_validation() {
        let schema = "tags: [str]<min=1, max=3>\n";
        assert!(
            validate(
                schema,
                map_of(&[("tags", Value::List(vec![Value::from("a")]))])
            )
            .is_empty()
        );

        let errors = validate(schema, map_of(&[("tags", Value::List(vec![]))]));
        assert!(errors[0].message.contains("too short"), "{errors:?}");

        let errors = validate(
            schema,
            map_of(&[(
                "tags",
                Value::List(vec![Value::from("a"), Value::Int(2)]),
            )]),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "tags[1]");
    }

    #[test]
    fn test_nested_object_paths() {
        let errors = validate(
            "user: {\n    address: {\n        zip: str\n    }\n}\n",
            map_of(&[(
                "user",
                Value::Object(map_of(&[(
                    "address",
                    Value::Object(map_of(&[("zip", Value::Int(12345))])),
                )])),
            )]),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "user.address.zip");
    }

    #[test]
    fn test_unknown_fields_strict_and_ext() {
        let data = map_of(&[(
            "user",
            Value::Object(map_of(&[
                ("name", Value::from("John")),
                ("email", Value::from("john@example.com")),
            ])),
        )]);

        let errors = validate("user: {name: str}\n", data.clone());
        assert!(
            errors[0].message.contains("contains unknown fields"),
            "{errors:?}"
        );

        let errors = validate("user: {name: str}<ext=true>\n", data.clone());
        assert!(errors.is_empty(), "{errors:?}");

        // strict=false overrides ext=false.
        let schema = Schema::parse("user: {name: str}\n").unwrap();
        let errors = SchemaValidator::with_strict(&schema, false).validate(&data);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_reserved_keys_never_unknown() {
        let errors = validate(
            "key: str\n",
            map_of(&[
                ("ftml_version", Value::from("1.0")),
                ("ftml_encoding", Value::from("utf-8")),
                ("key", Value::from("value")),
            ]),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_pattern_object() {
        let schema = "counts: {int}\n";
        assert!(
            validate(
                schema,
                map_of(&[(
                    "counts",
                    Value::Object(map_of(&[("a", Value::Int(1)), ("b", Value::Int(2))])),
                )])
            )
            .is_empty()
        );

        let errors = validate(
            schema,
            map_of(&[(
                "counts",
                Value::Object(map_of(&[("a", Value::from("one"))])),
            )]),
        );
        assert_eq!(errors[0].path, "counts.a");
    }

    #[test]
    fn test_untyped_object_accepts_anything() {
        let schema = "any_props: {}\n";
        let errors = validate(
            schema,
            map_of(&[(
                "any_props",
                Value::Object(map_of(&[
                    ("s", Value::from("x")),
                    ("n", Value::Int(1)),
                    ("nested", Value::Object(Map::new())),
                ])),
            )]),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_untyped_object_count_bounds() {
        let schema = "limited: {}<min=2, max=4>\n";
        let errors = validate(
            schema,
            map_of(&[("limited", Value::Object(map_of(&[("a", Value::Int(1))])))]),
        );
        assert!(errors[0].message.contains("too few keys"), "{errors:?}");
    }

    #[test]
    fn test_union_first_match_wins() {
        let schema = "id: str | int\n";
        assert!(validate(schema, map_of(&[("id", Value::from("abc"))])).is_empty());
        assert!(validate(schema, map_of(&[("id", Value::Int(7))])).is_empty());

        let errors = validate(schema, map_of(&[("id", Value::Bool(true))]));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "id does not match any allowed types"
        );
    }

    #[test]
    fn test_union_composite_error_only() {
        // Constraints participate in the match decision, and failures
        // surface as one composite error, never per-variant detail.
        let schema = "status: str<enum=[\"a\", \"b\"]> | null\n";
        assert!(validate(schema, map_of(&[("status", Value::Null)])).is_empty());

        let errors = validate(schema, map_of(&[("status", Value::from("c"))]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "status does not match any allowed types");
    }

    #[test]
    fn test_date_validation() {
        let schema = "birthday: date\n";
        assert!(validate(schema, map_of(&[("birthday", Value::from("2025-03-25"))])).is_empty());

        let errors = validate(schema, map_of(&[("birthday", Value::from("03/25/2025"))]));
        assert!(errors[0].message.contains("format"), "{errors:?}");
    }

    #[test]
    fn test_date_bounds() {
        let schema = "past_date: date<max=\"2020-01-01\">\nfuture_date: date<min=\"2030-01-01\">\n";
        let errors = validate(
            schema,
            map_of(&[
                ("past_date", Value::from("2024-06-01")),
                ("future_date", Value::from("2024-06-01")),
            ]),
        );
        assert_eq!(errors.len(), 2);
        let all = errors
            .iter()
            .map(|e| e.message.clone())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all.contains("past_date") && all.contains("after maximum date"), "{all}");
        assert!(all.contains("future_date") && all.contains("before minimum date"), "{all}");
    }

    #[test]
    fn test_timestamp_validation() {
        let schema = "ts: timestamp\n";
        assert!(validate(schema, map_of(&[("ts", Value::Int(1_711_373_760))])).is_empty());

        let errors = validate(schema, map_of(&[("ts", Value::Int(-5))]));
        assert!(errors[0].message.contains("negative"), "{errors:?}");

        let schema = "ts: timestamp<precision=\"seconds\">\n";
        let errors = validate(schema, map_of(&[("ts", Value::Int(1_711_373_760_123))]));
        assert!(errors[0].message.contains("too large"), "{errors:?}");
    }

    #[test]
    fn test_coerced_values_revalidate() {
        use chrono::NaiveDate;
        let schema = "birthday: date\n";
        let errors = validate(
            schema,
            map_of(&[(
                "birthday",
                Value::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
            )]),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_any_type() {
        let schema = "data: any\n";
        assert!(validate(schema, map_of(&[("data", Value::Int(1))])).is_empty());
        assert!(validate(schema, map_of(&[("data", Value::Object(Map::new()))])).is_empty());

        let schema = "mode: any<enum=[1, \"auto\"]>\n";
        assert!(validate(schema, map_of(&[("mode", Value::Int(1))])).is_empty());
        let errors = validate(schema, map_of(&[("mode", Value::Int(2))]));
        assert!(errors[0].message.contains("not in allowed values"), "{errors:?}");
    }
}
