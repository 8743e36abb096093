use std::process::ExitCode;

use anyhow::Result;
use room_atlas_engine::{GateError, ValidationError, check_consistency};
use serde_json::json;

use super::{FAILED, Paths, load_schema, normalize, print_json, validate};

pub fn run(paths: Paths, json: bool) -> Result<ExitCode> {
    let (schema, document) = load_schema(&paths.schema)?;

    log::info!("compiling {} ...", paths.rooms_dir.display());
    let report = match check_consistency(&schema, &document, &paths.rooms_dir, &paths.out_dir, &paths.glob) {
        Ok(report) => report,
        Err(GateError::Validation(e @ ValidationError::InvalidRecord { .. })) => {
            eprintln!("[room-atlas] ERROR: {e}");
            return Ok(ExitCode::from(FAILED));
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        print_json(&json!({
            "passed": report.passed(),
            "normalize": normalize::report_json(&report.normalize),
            "drift": report.drift.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "invalid": validate::violations_json(&report.violations),
        }))?;
    } else if report.passed() {
        println!(
            "Atlas compile gate passed: {} record(s) up to date and valid.",
            report.normalize.ok_count()
        );
    } else if !report.normalize.is_success() {
        normalize::print_report(&report.normalize);
    } else {
        if !report.drift.is_empty() {
            eprintln!("Committed records differ from compiler output:");
            for drift in &report.drift {
                eprintln!(" - {drift}");
            }
            eprintln!("Run `room-atlas normalize` and commit the changes.");
        }
        validate::print_violations(&report.violations);
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(FAILED)
    })
}
