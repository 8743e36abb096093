use std::process::ExitCode;

use anyhow::{Context, Result};
use room_atlas_engine::{RecordValidator, RecordViolations, ValidationError, read_schema_document};
use serde_json::json;

use super::{FAILED, Paths, print_json};

pub fn run(paths: Paths, json: bool) -> Result<ExitCode> {
    let document = read_schema_document(&paths.schema).context("SCHEMA ERROR")?;
    let validator = RecordValidator::new(&document).context("SCHEMA ERROR")?;

    let failed = match validator.check_dir(&paths.out_dir) {
        Ok(failed) => failed,
        Err(e @ (ValidationError::NoRecords(_) | ValidationError::InvalidRecord { .. })) => {
            eprintln!("[room-atlas] ERROR: {e}");
            return Ok(ExitCode::from(FAILED));
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        print_json(&json!({ "invalid": violations_json(&failed) }))?;
    } else if failed.is_empty() {
        println!(
            "All records in {} validate against {}.",
            paths.out_dir.display(),
            paths.schema.display()
        );
    } else {
        print_violations(&failed);
    }

    Ok(if failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(FAILED)
    })
}

pub(super) fn violations_json(failed: &[RecordViolations]) -> serde_json::Value {
    failed
        .iter()
        .map(|record| {
            json!({
                "file": record.file.display().to_string(),
                "violations": record
                    .violations
                    .iter()
                    .map(|v| json!({ "path": v.location, "message": v.message }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect()
}

pub(super) fn print_violations(failed: &[RecordViolations]) {
    for record in failed {
        eprintln!("\n{}:", record.file.display());
        for violation in &record.violations {
            eprintln!("  - {}: {}", violation.location, violation.message);
        }
    }
}
