//! room-atlas CLI: the `room-atlas` command.
//!
//! Exit status: 0 on success, 1 when documents fail, records are invalid or
//! committed output has drifted, 2 for schema, configuration or usage errors.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::Settings;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init { force } => {
            let path = cli
                .config
                .unwrap_or_else(|| room_atlas_config::DEFAULT_CONFIG_FILE.into());
            commands::init::run(&path, force)
        }
        command => Settings::load(cli.config.as_deref()).and_then(|settings| dispatch(&settings, command)),
    };

    result.unwrap_or_else(commands::usage_error)
}

fn dispatch(settings: &Settings, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Init { .. } => Ok(ExitCode::SUCCESS),

        Commands::Normalize {
            schema,
            in_dir,
            out,
            glob,
            fail_fast,
            fix_titles,
            json,
        } => commands::normalize::run(commands::normalize::Args {
            paths: settings.with(schema, in_dir, out, glob),
            fail_fast,
            fix_titles,
            json,
        }),

        Commands::Validate { schema, out, json } => {
            commands::validate::run(settings.with(schema, None, out, None), json)
        }

        Commands::Check {
            schema,
            in_dir,
            out,
            glob,
            json,
        } => commands::check::run(settings.with(schema, in_dir, out, glob), json),
    }
}
