use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tipo JSON esperado para un campo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Any,
}

impl FieldKind {
    /// `true` si `value` tiene la forma JSON de este kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
            FieldKind::Any => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Any => "any",
        }
    }

    /// Nombre del tipo JSON encontrado (para mensajes de error).
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_f64() => "number",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaración de un campo de esquema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Campos no requeridos aceptan ausencia y `null`.
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
        Self { name, kind, required }
    }

    /// Deriva la declaración a partir del tipo Rust del campo.
    pub const fn of<T: FieldType + ?Sized>(name: &'static str) -> Self {
        Self::new(name, T::KIND, T::REQUIRED)
    }

    /// Misma declaración, pero el campo puede faltar.
    pub const fn optional(self) -> Self {
        Self { required: false, ..self }
    }
}

/// Mapea tipos Rust a su forma JSON.
pub trait FieldType {
    const KIND: FieldKind;
    const REQUIRED: bool = true;
}

macro_rules! field_type {
    ($kind:expr => $($t:ty),+) => {
        $(impl FieldType for $t { const KIND: FieldKind = $kind; })+
    };
}

field_type!(FieldKind::String => String, str, char);
field_type!(FieldKind::Boolean => bool);
field_type!(FieldKind::Integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
field_type!(FieldKind::Number => f32, f64);
field_type!(FieldKind::Any => Value);

impl<T: FieldType> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;
    const REQUIRED: bool = false;
}

impl<T: FieldType + ?Sized> FieldType for Box<T> {
    const KIND: FieldKind = T::KIND;
    const REQUIRED: bool = T::REQUIRED;
}

impl<T> FieldType for Vec<T> {
    const KIND: FieldKind = FieldKind::Array;
}

impl<A, B> FieldType for (A, B) {
    const KIND: FieldKind = FieldKind::Array;
}

impl<A, B, C> FieldType for (A, B, C) {
    const KIND: FieldKind = FieldKind::Array;
}

impl<V> FieldType for HashMap<String, V> {
    const KIND: FieldKind = FieldKind::Object;
}

impl<V> FieldType for BTreeMap<String, V> {
    const KIND: FieldKind = FieldKind::Object;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_fields_are_not_required() {
        let spec = FieldSpec::of::<Option<String>>("source");
        assert_eq!(spec.kind, FieldKind::String);
        assert!(!spec.required);
        assert!(FieldSpec::of::<String>("text").required);
    }

    #[test]
    fn defaulted_vec_is_an_optional_array() {
        let spec = FieldSpec::of::<Vec<String>>("changes_made").optional();
        assert_eq!(spec.kind, FieldKind::Array);
        assert!(!spec.required);
    }

    #[test]
    fn integer_kind_rejects_floats() {
        assert!(FieldKind::Integer.matches(&json!(3)));
        assert!(!FieldKind::Integer.matches(&json!(3.5)));
        assert!(FieldKind::Number.matches(&json!(3)));
        assert_eq!(FieldKind::describe(&json!(3.5)), "number");
    }

    #[test]
    fn tuples_and_vectors_are_arrays() {
        assert_eq!(FieldSpec::of::<Vec<(String, usize)>>("most_common").kind, FieldKind::Array);
        assert_eq!(FieldSpec::of::<(String, usize)>("pair").kind, FieldKind::Array);
    }
}
