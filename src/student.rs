//! Student record and sparse update patch.

use serde::{Deserialize, Serialize};

use crate::types::{FieldError, Gpa, RollNo};

/// One student entry as stored and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique, immutable roll number.
    #[serde(rename = "rollNumber", alias = "roll")]
    pub roll: RollNo,
    /// Display name, trimmed.
    pub name: String,
    /// Grade point average.
    pub gpa: Gpa,
}

impl StudentRecord {
    /// Builds a record from already validated parts, trimming the name.
    pub fn new(roll: RollNo, name: &str, gpa: Gpa) -> Result<Self, FieldError> {
        Ok(Self {
            roll,
            name: normalize_name(name)?,
            gpa,
        })
    }

    /// Builds a record from raw form text.
    pub fn parse(roll: &str, name: &str, gpa: &str) -> Result<Self, FieldError> {
        Self::new(RollNo::new(roll)?, name, Gpa::parse(gpa)?)
    }

    /// Re-applies field rules to a record that bypassed the constructors,
    /// e.g. one decoded straight from JSON, and returns it with the name
    /// trimmed.
    pub fn normalized(mut self) -> Result<Self, FieldError> {
        self.name = normalize_name(&self.name)?;
        Ok(self)
    }
}

/// Sparse update where each `Some` field overwrites the record value.
///
/// There is deliberately no roll number field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentPatch {
    /// Optional replacement name.
    pub name: Option<String>,
    /// Optional replacement GPA.
    pub gpa: Option<Gpa>,
}

impl StudentPatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Builds a patch from optional raw form text; blank fields are left unset.
    pub fn parse(name: Option<&str>, gpa: Option<&str>) -> Result<Self, FieldError> {
        let name = match name {
            Some(n) if !n.trim().is_empty() => Some(normalize_name(n)?),
            _ => None,
        };
        let gpa = match gpa {
            Some(g) if !g.trim().is_empty() => Some(Gpa::parse(g)?),
            _ => None,
        };
        Ok(Self { name, gpa })
    }

    /// Checks the patch without touching any record.
    pub fn validate(&self) -> Result<(), FieldError> {
        match &self.name {
            Some(n) => normalize_name(n).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut StudentRecord) {
        if let Some(v) = &self.name {
            rec.name = v.trim().to_string();
        }
        if let Some(v) = self.gpa {
            rec.gpa = v;
        }
    }
}

fn normalize_name(name: &str) -> Result<String, FieldError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FieldError::EmptyName);
    }
    Ok(trimmed.to_string())
}
