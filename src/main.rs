//! prereq-check - evaluate a prerequisite tree against a character
//!
//! Loads a character and a prerequisite tree (TOML or JSON), evaluates the
//! tree and prints the verdict with explanation lines for each failure.
//! Exits with status 1 when the prerequisites are not satisfied.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use prereq_engine::core::config::{config, set_config};
use prereq_engine::core::error::{PrereqError, Result};
use prereq_engine::core::types::RowId;
use prereq_engine::loader::{load_character, load_config, load_prereqs};
use prereq_engine::prereq::Request;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Check whether a character satisfies a prerequisite tree
#[derive(Parser, Debug)]
#[command(name = "prereq-check")]
#[command(about = "Evaluate a prerequisite tree against a character and explain failures")]
struct Args {
    /// Character file (.toml or .json); not needed with --list-keys
    #[arg(long, short = 'c', required_unless_present = "list_keys")]
    character: Option<PathBuf>,

    /// Prerequisite tree file (.toml or .json)
    #[arg(long, short = 'p')]
    prereqs: PathBuf,

    /// Id of the character row that owns the prerequisites; it never
    /// satisfies its own requirements
    #[arg(long)]
    exclude: Option<Uuid>,

    /// Prefix for every explanation line (defaults to the configured prefix)
    #[arg(long)]
    prefix: Option<String>,

    /// Substitute a nameable key before evaluating, as KEY=VALUE
    #[arg(long = "set", value_parser = parse_key_value)]
    substitutions: Vec<(String, String)>,

    /// List the nameable keys used by the tree and exit
    #[arg(long)]
    list_keys: bool,

    /// Engine config file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// JSON output structure
#[derive(Serialize)]
struct Report<'a> {
    character: &'a str,
    satisfied: bool,
    explanation: &'a [String],
}

fn parse_key_value(text: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", text))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prereq_engine=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    if let Some(path) = &args.config {
        let loaded = load_config(path)?;
        if set_config(loaded).is_err() {
            tracing::warn!("engine config already initialized; ignoring {}", path.display());
        }
    }

    let mut tree = load_prereqs(&args.prereqs)?;
    let root = tree.root();

    if args.list_keys {
        let mut keys = BTreeSet::new();
        tree.collect_nameable_keys(root, &mut keys);
        for key in keys {
            println!("{}", key);
        }
        return Ok(true);
    }

    let path = args
        .character
        .as_ref()
        .ok_or_else(|| PrereqError::InvalidConfig("--character is required".to_string()))?;
    let character = load_character(path)?;

    if !args.substitutions.is_empty() {
        let map: HashMap<String, String> = args.substitutions.iter().cloned().collect();
        tree.apply_nameable_keys(root, &map);
    }

    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| config().default_line_prefix.clone());
    let mut request = Request::new(&character).explained(&prefix);
    if let Some(id) = args.exclude {
        let row = character
            .find_row(RowId(id))
            .ok_or(PrereqError::RowNotFound(RowId(id)))?;
        request = request.excluding(row);
    }

    let outcome = tree.satisfied(&request);
    tracing::info!(character = %character.name, satisfied = outcome.satisfied, "evaluated");

    match args.format {
        OutputFormat::Text => {
            if outcome.satisfied {
                println!("{} satisfies the prerequisites", character.name);
            } else {
                println!("{} does not satisfy the prerequisites:", character.name);
                for line in &outcome.lines {
                    println!("{}", line);
                }
            }
        }
        OutputFormat::Json => {
            let report = Report {
                character: &character.name,
                satisfied: outcome.satisfied,
                explanation: &outcome.lines,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(outcome.satisfied)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn test_list_keys_needs_no_character() {
        let args = Args::try_parse_from(["prereq-check", "--prereqs", "tree.toml", "--list-keys"])
            .unwrap();
        assert!(args.list_keys);
        assert!(args.character.is_none());
    }

    #[test]
    fn test_evaluation_requires_character() {
        assert!(Args::try_parse_from(["prereq-check", "--prereqs", "tree.toml"]).is_err());

        let args =
            Args::try_parse_from(["prereq-check", "-p", "tree.toml", "-c", "hero.toml"]).unwrap();
        assert_eq!(args.character, Some(PathBuf::from("hero.toml")));
    }

    #[test]
    fn test_list_keys_runs_without_loading_a_character() {
        let prereqs = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("prereqs")
            .join("weapon_master.toml");
        let args = Args::try_parse_from([
            OsStr::new("prereq-check"),
            OsStr::new("--prereqs"),
            prereqs.as_os_str(),
            OsStr::new("--list-keys"),
        ])
        .unwrap();
        assert!(run(&args).unwrap());
    }
}
