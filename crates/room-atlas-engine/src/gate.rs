//! The compile gate: committed records must be exactly what the normalizer
//! produces today, and must satisfy the schema.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::io::{self, IoError};
use crate::pipeline::{NormalizeOptions, Pipeline, RunError, RunReport};
use crate::schema::RoomSchema;
use crate::validate::{RecordValidator, RecordViolations, ValidationError};

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Could not create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A difference between freshly compiled and committed records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// Compiled but not committed.
    Missing(PathBuf),
    /// Committed but no longer produced.
    Unexpected(PathBuf),
    /// Committed bytes differ from the compiled record.
    Changed(PathBuf),
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::Missing(p) => write!(f, "missing: {}", p.display()),
            Drift::Unexpected(p) => write!(f, "unexpected: {}", p.display()),
            Drift::Changed(p) => write!(f, "out of date: {}", p.display()),
        }
    }
}

#[derive(Debug)]
pub struct GateReport {
    pub normalize: RunReport,
    pub drift: Vec<Drift>,
    pub violations: Vec<RecordViolations>,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.normalize.is_success() && self.drift.is_empty() && self.violations.is_empty()
    }
}

/// Compiles `rooms_dir` into a scratch directory and compares it with `out_dir`.
///
/// Titles are never fixed here and the compile stops at the first failing
/// document. Drift and validation are only checked once compilation succeeds.
pub fn check_consistency(
    schema: &RoomSchema,
    schema_document: &Value,
    rooms_dir: &Path,
    out_dir: &Path,
    glob: &str,
) -> Result<GateReport, GateError> {
    let scratch = tempfile::tempdir().map_err(GateError::Scratch)?;

    let mut options = NormalizeOptions::new(rooms_dir, scratch.path());
    options.glob = glob.to_string();
    options.fail_fast = true;
    let normalize = Pipeline::new(schema, options).run()?;

    if !normalize.is_success() {
        return Ok(GateReport {
            normalize,
            drift: vec![],
            violations: vec![],
        });
    }

    let drift = diff_records(scratch.path(), out_dir)?;
    for d in &drift {
        log::warn!("{d}");
    }

    // Absent records already show up as drift.
    let violations = if has_records(out_dir) {
        RecordValidator::new(schema_document)?.check_dir(out_dir)?
    } else {
        vec![]
    };

    Ok(GateReport {
        normalize,
        drift,
        violations,
    })
}

/// Compares the `*.json` records of two directories by name and content.
pub fn diff_records(compiled_dir: &Path, committed_dir: &Path) -> Result<Vec<Drift>, IoError> {
    let compiled = records_by_name(compiled_dir)?;
    let committed = if committed_dir.is_dir() {
        records_by_name(committed_dir)?
    } else {
        BTreeMap::new()
    };

    let mut drift = Vec::new();
    for (name, fresh) in &compiled {
        let target = committed_dir.join(name);
        match committed.get(name) {
            None => drift.push(Drift::Missing(target)),
            Some(existing) => {
                let fresh_bytes = fs::read(fresh).map_err(|source| IoError::Io {
                    path: fresh.clone(),
                    source,
                })?;
                let existing_bytes = fs::read(existing).map_err(|source| IoError::Io {
                    path: existing.clone(),
                    source,
                })?;
                if fresh_bytes != existing_bytes {
                    drift.push(Drift::Changed(target));
                }
            }
        }
    }
    for (name, existing) in &committed {
        if !compiled.contains_key(name) {
            drift.push(Drift::Unexpected(existing.clone()));
        }
    }
    Ok(drift)
}

fn has_records(dir: &Path) -> bool {
    dir.is_dir() && io::scan_records(dir).is_ok_and(|records| !records.is_empty())
}

fn records_by_name(dir: &Path) -> Result<BTreeMap<OsString, PathBuf>, IoError> {
    Ok(io::scan_records(dir)?
        .into_iter()
        .filter_map(|path| path.file_name().map(|name| (name.to_os_string(), path.clone())))
        .collect())
}
