use std::process::ExitCode;

use anyhow::Result;
use room_atlas_engine::{NormalizeOptions, Pipeline, RunReport};
use serde_json::json;

use super::{FAILED, Paths, load_schema, print_json};

pub struct Args {
    pub paths: Paths,
    pub fail_fast: bool,
    pub fix_titles: bool,
    pub json: bool,
}

pub fn run(args: Args) -> Result<ExitCode> {
    let (schema, _) = load_schema(&args.paths.schema)?;

    let mut options = NormalizeOptions::new(&args.paths.rooms_dir, &args.paths.out_dir);
    options.glob = args.paths.glob;
    options.fail_fast = args.fail_fast;
    options.fix_titles = args.fix_titles;

    let report = Pipeline::new(&schema, options).run()?;

    if args.json {
        print_json(&report_json(&report))?;
    } else {
        print_report(&report);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(FAILED)
    })
}

pub(super) fn report_json(report: &RunReport) -> serde_json::Value {
    json!({
        "total": report.total,
        "ok": report.ok_count(),
        "stopped_early": report.stopped_early,
        "fixes": report.fixes.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "errors": report.failures.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

pub(super) fn print_report(report: &RunReport) {
    if report.is_success() {
        println!(
            "Normalization successful. OK: {} / {}",
            report.ok_count(),
            report.total
        );
        return;
    }

    eprintln!(
        "\nNormalization completed with errors ({}).",
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!(" - {failure}");
    }
    if report.stopped_early {
        eprintln!("Stopped at first error (--fail-fast).");
    }
    eprintln!("\nOK: {} / {}", report.ok_count(), report.total);
}
