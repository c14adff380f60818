//! Identificadores del Sample Store.
//!
//! Ningún string externo llega a construir una ruta: los nombres de unidad,
//! las direcciones y los nombres de archivo se validan al construir estos
//! tipos y cualquier valor no reconocido falla de inmediato.
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_UNIT_NAME_LEN, SAMPLE_EXTENSION, SAMPLE_STAMP_FORMAT};
use crate::errors::IdentifierError;

static UNIT_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("unit name regex"));

static SAMPLE_FILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(input|output)_([0-9]{8}_[0-9]{6}_[0-9]{3})(?:_([0-9]{3}))?\.json$").expect("sample file regex")
});

/// Mayor contador de colisión representable en el nombre de archivo.
pub const MAX_COLLISION_COUNTER: u16 = 999;

/// Nombre de unidad validado (minúsculas ASCII, dígitos, `_` y `-`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitName(String);

impl UnitName {
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentifierError { value, reason: "empty name" });
        }
        if value.len() > MAX_UNIT_NAME_LEN {
            return Err(IdentifierError { value, reason: "name too long" });
        }
        if !UNIT_NAME_RE.is_match(&value) {
            return Err(IdentifierError { value,
                                         reason: "only lowercase ascii letters, digits, '_' and '-' are allowed" });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UnitName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitName> for String {
    fn from(name: UnitName) -> Self {
        name.0
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dirección de una muestra respecto de la unidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "input" => Some(Direction::Input),
            "output" => Some(Direction::Output),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identificador de una muestra persistida: `{unit}/{direction}_{stamp}[_NNN].json`.
///
/// El orden (`Ord`) es cronológico: sello temporal y luego contador de
/// colisión. Sólo tiene sentido entre ids de la misma unidad y dirección.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleId {
    unit: UnitName,
    direction: Direction,
    stamp: String,
    counter: u16,
}

impl SampleId {
    /// Id para una muestra escrita en `at`. `counter` > 0 desambigua
    /// escrituras dentro del mismo milisegundo.
    pub fn at(unit: UnitName, direction: Direction, at: DateTime<Utc>, counter: u16) -> Result<Self, IdentifierError> {
        if counter > MAX_COLLISION_COUNTER {
            return Err(IdentifierError { value: format!("{unit}/{direction}"),
                                         reason: "too many samples within the same millisecond" });
        }
        Ok(Self { unit,
                  direction,
                  stamp: at.format(SAMPLE_STAMP_FORMAT).to_string(),
                  counter })
    }

    /// Construye el id a partir de un nombre de archivo dentro del directorio
    /// de `unit`.
    pub fn from_file_name(unit: UnitName, file_name: &str) -> Result<Self, IdentifierError> {
        let caps = SAMPLE_FILE_RE.captures(file_name).ok_or_else(|| IdentifierError { value: file_name.to_string(),
                                                                                       reason: "not a sample file name" })?;
        let direction = Direction::parse(&caps[1]).ok_or_else(|| IdentifierError { value: file_name.to_string(),
                                                                                    reason: "unknown direction" })?;
        let counter = match caps.get(3) {
            Some(m) => m.as_str().parse::<u16>().map_err(|_| IdentifierError { value: file_name.to_string(),
                                                                             reason: "invalid collision counter" })?,
            None => 0,
        };
        Ok(Self { unit,
                  direction,
                  stamp: caps[2].to_string(),
                  counter })
    }

    /// Parsea la forma `unit/file_name`.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let (unit, file) = value.split_once('/').ok_or_else(|| IdentifierError { value: value.to_string(),
                                                                                 reason: "expected '<unit>/<file>'" })?;
        Self::from_file_name(UnitName::new(unit)?, file)
    }

    pub fn unit(&self) -> &UnitName {
        &self.unit
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn counter(&self) -> u16 {
        self.counter
    }

    pub fn file_name(&self) -> String {
        if self.counter == 0 {
            format!("{}_{}.{}", self.direction, self.stamp, SAMPLE_EXTENSION)
        } else {
            format!("{}_{}_{:03}.{}", self.direction, self.stamp, self.counter, SAMPLE_EXTENSION)
        }
    }

    /// Mismo instante, siguiente contador de colisión.
    pub fn next_collision(&self) -> Result<Self, IdentifierError> {
        if self.counter >= MAX_COLLISION_COUNTER {
            return Err(IdentifierError { value: self.to_string(),
                                         reason: "too many samples within the same millisecond" });
        }
        Ok(Self { counter: self.counter + 1,
                  ..self.clone() })
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.unit, self.file_name())
    }
}

impl Ord for SampleId {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.stamp, self.counter, &self.unit, self.direction).cmp(&(&other.stamp, other.counter, &other.unit, other.direction))
    }
}

impl PartialOrd for SampleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
