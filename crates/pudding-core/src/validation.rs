//! Validación de datos crudos contra un `Schema`.
//!
//! El core trata la validación como una capacidad intercambiable: la unidad de
//! ejecución sólo conoce el trait `Validator`. `StructuralValidator` es la
//! implementación por defecto y compara el objeto JSON recibido contra los
//! campos declarados por el esquema antes de delegar la decodificación a serde.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FieldKind, Schema};

/// Campo presente con un tipo JSON distinto del declarado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: FieldKind,
    pub found: String,
}

/// Detalle estructurado de un fallo de validación.
///
/// `expected` y `received` enumeran ambos conjuntos de campos completos para
/// que el mensaje sea autocontenido aun sin acceso al esquema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub expected: Vec<String>,
    pub received: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub mismatched: Vec<FieldMismatch>,
    /// Error del decodificador o del `check()` semántico, si lo hubo.
    pub detail: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.mismatched.is_empty() && self.detail.is_none()
    }

    pub fn is_missing(&self, field: &str) -> bool {
        self.missing.iter().any(|f| f == field)
    }

    pub fn is_extra(&self, field: &str) -> bool {
        self.extra.iter().any(|f| f == field)
    }

    pub fn is_mismatched(&self, field: &str) -> bool {
        self.mismatched.iter().any(|m| m.field == field)
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing fields [{}]", self.missing.join(", ")));
        }
        if !self.extra.is_empty() {
            parts.push(format!("unexpected fields [{}]", self.extra.join(", ")));
        }
        for m in &self.mismatched {
            parts.push(format!("field '{}' expected {}, found {}", m.field, m.expected, m.found));
        }
        if let Some(detail) = &self.detail {
            parts.push(detail.clone());
        }
        parts.push(format!("expected fields [{}], received [{}]",
                           self.expected.join(", "),
                           self.received.join(", ")));
        f.write_str(&parts.join("; "))
    }
}

/// Capacidad de validación: dado un esquema y datos crudos, devuelve el valor
/// tipado o la enumeración de campos problemáticos.
pub trait Validator: Send + Sync {
    fn validate<S: Schema>(&self, raw: &Value) -> Result<S, FieldErrors>;
}

/// Política ante campos no declarados por el esquema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraFields {
    #[default]
    Reject,
    Ignore,
}

/// Validador por defecto: forma del objeto, luego serde, luego `check()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator {
    pub extra: ExtraFields,
}

impl StructuralValidator {
    pub fn new(extra: ExtraFields) -> Self {
        Self { extra }
    }

    /// Variante permisiva que ignora campos sobrantes.
    pub fn lenient() -> Self {
        Self::new(ExtraFields::Ignore)
    }
}

impl Validator for StructuralValidator {
    fn validate<S: Schema>(&self, raw: &Value) -> Result<S, FieldErrors> {
        let specs = S::fields();
        let mut errors = FieldErrors { expected: specs.iter().map(|s| s.name.to_string()).collect(),
                                       ..FieldErrors::default() };

        let Some(obj) = raw.as_object() else {
            errors.missing = specs.iter().filter(|s| s.required).map(|s| s.name.to_string()).collect();
            return Err(errors.with_detail(format!("expected a JSON object, got {}", FieldKind::describe(raw))));
        };
        errors.received = obj.keys().cloned().collect();

        for spec in &specs {
            match obj.get(spec.name) {
                None => {
                    if spec.required {
                        errors.missing.push(spec.name.to_string());
                    }
                }
                Some(Value::Null) if !spec.required => {}
                Some(value) if !spec.kind.matches(value) => {
                    errors.mismatched.push(FieldMismatch { field: spec.name.to_string(),
                                                           expected: spec.kind,
                                                           found: FieldKind::describe(value).to_string() });
                }
                Some(_) => {}
            }
        }

        if self.extra == ExtraFields::Reject {
            errors.extra = obj.keys()
                              .filter(|k| !specs.iter().any(|s| s.name == k.as_str()))
                              .cloned()
                              .collect();
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let decoded: S = match serde_json::from_value(raw.clone()) {
            Ok(v) => v,
            Err(e) => return Err(errors.with_detail(e.to_string())),
        };
        if let Err(message) = decoded.check() {
            return Err(errors.with_detail(message));
        }
        Ok(decoded)
    }
}
