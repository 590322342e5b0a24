//! Validated field types and sort selectors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Lowest accepted GPA.
pub const GPA_MIN: f64 = 0.0;
/// Highest accepted GPA.
pub const GPA_MAX: f64 = 4.0;

/// Coarse error category shared by every error enum in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A record with the same roll number already exists.
    DuplicateKey,
    /// No record has the requested roll number.
    NotFound,
    /// Malformed input or persisted data.
    InvalidFormat,
    /// Filesystem failure.
    Io,
}

/// Rejected field input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Roll number was empty after trimming.
    #[error("roll number must not be empty")]
    EmptyRoll,
    /// Name was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// GPA text did not parse as a number.
    #[error("GPA `{0}` is not a number")]
    GpaNotNumber(String),
    /// GPA was NaN, infinite, or outside the accepted scale.
    #[error("GPA {0} is outside 0.0..=4.0")]
    GpaOutOfRange(f64),
}

impl FieldError {
    /// Field errors are always format errors.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidFormat
    }
}

/// Normalized, immutable student roll number.
///
/// Normalization trims surrounding whitespace and upper-cases ASCII letters,
/// so `" cs-01 "` and `"CS-01"` name the same student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RollNo(String);

impl RollNo {
    /// Normalizes and validates raw roll input.
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        let norm = raw.trim().to_ascii_uppercase();
        if norm.is_empty() {
            return Err(FieldError::EmptyRoll);
        }
        Ok(Self(norm))
    }

    /// Normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when the roll number is made only of ASCII digits.
    pub fn as_number(&self) -> Option<u128> {
        if self.0.bytes().all(|b| b.is_ascii_digit()) {
            self.0.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for RollNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RollNo {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for RollNo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RollNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older files wrote roll numbers as bare integers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(u64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Int(n) => n.to_string(),
        };
        RollNo::new(&text).map_err(serde::de::Error::custom)
    }
}

/// Grade point average on the `GPA_MIN..=GPA_MAX` scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Gpa(f64);

impl Gpa {
    /// Validates a numeric GPA.
    pub fn new(value: f64) -> Result<Self, FieldError> {
        if !value.is_finite() || !(GPA_MIN..=GPA_MAX).contains(&value) {
            return Err(FieldError::GpaOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Parses and validates GPA text as typed into a form.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| FieldError::GpaNotNumber(trimmed.to_string()))?;
        Self::new(value)
    }

    /// Raw value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Gpa {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Gpa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Gpa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Gpa::new(value).map_err(serde::de::Error::custom)
    }
}

/// Field used to order a sorted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Roll number; all-digit rolls first, in numeric order.
    #[default]
    Roll,
    /// Case-insensitive name.
    Name,
    /// GPA.
    Gpa,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roll" | "rollnumber" => Ok(Self::Roll),
            "name" => Ok(Self::Name),
            "gpa" => Ok(Self::Gpa),
            other => Err(format!("unknown sort key `{other}` (expected roll, name or gpa)")),
        }
    }
}

/// Direction of a sorted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort order `{other}` (expected asc or desc)")),
        }
    }
}
