//! Structural validation of produced records against the full JSON Schema.
//!
//! The normalizer only derives a grammar from the schema; this gate checks the
//! records it wrote against every constraint the schema declares.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::io::{self, IoError};
use crate::models::NormalizedRoom;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Schema could not be compiled for validation: {0}")]
    Compile(String),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Record {} is not valid JSON: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No JSON records found in {}", .0.display())]
    NoRecords(PathBuf),
}

/// One schema violation inside a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Slash-joined path into the record, or `<root>`.
    pub location: String,
    pub message: String,
}

/// Violations found in one record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordViolations {
    pub file: PathBuf,
    pub violations: Vec<Violation>,
}

pub struct RecordValidator {
    validator: jsonschema::Validator,
}

impl RecordValidator {
    pub fn new(schema: &Value) -> Result<Self, ValidationError> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| ValidationError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    pub fn check(&self, instance: &Value) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                location: location_of(&e.instance_path.to_string()),
                message: e.to_string(),
            })
            .collect();
        violations.sort_by(|a, b| a.location.cmp(&b.location));
        violations
    }

    pub fn check_room(&self, room: &NormalizedRoom) -> Result<Vec<Violation>, serde_json::Error> {
        Ok(self.check(&room.to_json_value()?))
    }

    /// Validates every `*.json` record in `out_dir`; only records with
    /// violations are returned, in path order.
    pub fn check_dir(&self, out_dir: &Path) -> Result<Vec<RecordViolations>, ValidationError> {
        let records = io::scan_records(out_dir)?;
        if records.is_empty() {
            return Err(ValidationError::NoRecords(out_dir.to_path_buf()));
        }

        let mut failed = Vec::new();
        for path in records {
            let text = fs::read_to_string(&path).map_err(|source| IoError::Io {
                path: path.clone(),
                source,
            })?;
            let instance: Value = serde_json::from_str(&text).map_err(|source| {
                ValidationError::InvalidRecord {
                    path: path.clone(),
                    source,
                }
            })?;

            let violations = self.check(&instance);
            if !violations.is_empty() {
                log::warn!("{}: {} schema violation(s)", path.display(), violations.len());
                failed.push(RecordViolations {
                    file: path,
                    violations,
                });
            }
        }
        Ok(failed)
    }
}

/// Turns a JSON pointer into a readable slash-joined path.
///
/// `/sections/Hidden~1conditional transitions/0` becomes
/// `sections/Hidden/conditional transitions/0`.
fn location_of(pointer: &str) -> String {
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    if trimmed.is_empty() {
        return "<root>".to_string();
    }
    trimmed
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join("/")
}
