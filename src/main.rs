//! tagsweep CLI
//!
//! # What this program is
//! A one-shot command-line tool: open one MP3, clean its ID3 fields according
//! to a JSON rule file, and write the result back.
//!
//! # Flow
//! - load rules (`--config`, default `config.json`)
//! - load the file
//! - apply any `--set key=value` edits
//! - (`--show`) print every field before the cleanup
//! - run the cleanup and print what happened per field
//! - (`--remove-art`) drop embedded pictures
//! - save, unless `--dry-run`
//! - (`--show`) print every field after the cleanup
//!
//! # Architecture constraints (on purpose)
//! - All decisions live in `tagsweep::core`.
//! - This file only parses arguments, prints, and maps errors to an exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;

use tagsweep::Session;
use tagsweep::core::{FieldOutcome, ReconcileReport};
use tagsweep::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "tagsweep", version, about = "Rule-driven cleanup of ID3 metadata", long_about = None)]
struct Cli {
    /// MP3 file to clean
    file: PathBuf,

    /// Rule file (JSON)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Set a field before cleanup, e.g. --set title="Song Name" (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    sets: Vec<String>,

    /// Remove embedded cover art
    #[arg(long)]
    remove_art: bool,

    /// Do everything except writing the file
    #[arg(long)]
    dry_run: bool,

    /// Print all metadata before and after the cleanup
    #[arg(long)]
    show: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.json_logs) {
        eprintln!("warning: logging unavailable: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut session = Session::from_config_file(&cli.config)
        .with_context(|| format!("Failed to load rules from {}", cli.config.display()))?;

    session
        .load_file(&cli.file)
        .with_context(|| format!("Unable to load file {}", cli.file.display()))?;

    for assignment in &cli.sets {
        let (key, value) = parse_assignment(assignment)?;
        session
            .set_field(key, value)
            .with_context(|| format!("Unable to set {key}"))?;
    }

    if cli.show {
        println!("=== METADATA BEFORE CORRECTION ===");
        print!("{}", session.listing()?);
    }

    let report = session
        .check_and_correct_all()
        .context("Error during automatic corrections")?;
    print_report(&report);

    if cli.remove_art {
        let removed = session
            .remove_album_art()
            .context("Unable to remove cover art")?;
        println!("Removed {removed} embedded picture(s).");
    }

    if cli.dry_run {
        println!("Dry run: nothing written.");
    } else {
        session.save_file().context("Unable to save file")?;
        println!("Changes saved to {}.", cli.file.display());
    }

    if cli.show {
        println!();
        println!("=== METADATA AFTER CORRECTION ===");
        print!("{}", session.listing()?);
    }

    match session.album_art()? {
        Some((data, mime)) => println!("Cover: {mime}, {} bytes", data.len()),
        None => println!("No cover art found."),
    }

    Ok(())
}

/// Split `key=value`. The value may itself contain `=`.
fn parse_assignment(s: &str) -> Result<(&str, &str)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("expected KEY=VALUE, got {s:?}"),
    }
}

fn print_report(report: &ReconcileReport) {
    if report.changed_count() == 0 {
        println!("No corrections needed.");
        return;
    }

    for (key, field) in report.iter() {
        match &field.outcome {
            FieldOutcome::Kept { changed: false, .. } => {}
            FieldOutcome::Kept {
                values,
                changed: true,
            } => println!("fixed    {key}: {values:?}"),
            FieldOutcome::Removed => println!("removed  {key}"),
            FieldOutcome::CascadeRemoved { parent } => {
                println!("removed  {key} (depends on {parent})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parsing() {
        assert_eq!(parse_assignment("title=Song").unwrap(), ("title", "Song"));
        assert_eq!(parse_assignment("title=a=b").unwrap(), ("title", "a=b"));
        assert_eq!(parse_assignment("genre=").unwrap(), ("genre", ""));
        assert!(parse_assignment("title").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
