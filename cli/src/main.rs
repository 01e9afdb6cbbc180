//! fieldrules CLI
//!
//! Check JSON documents against field-level rule schemas.
//!
//! ## Usage
//!
//! ```bash
//! # Check a document, stopping at the first violation
//! fieldrules check order.json order_schema.json
//!
//! # Report every violation, as JSON
//! fieldrules check order.json order_schema.json --all --format json
//!
//! # Shape-check a schema and summarize its rules
//! fieldrules schema order_schema.json
//! ```
//!
//! ## Exit Codes
//!
//! - 0: valid
//! - 1: rule violation
//! - 2: input error (unreadable file, malformed JSON or schema)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::Level;

use fieldrules_core::{
    validate_files, FieldPair, LoadError, Mode, Outcome, RuleKind, RuleSchema, ValidateOptions,
};

const EXIT_VALID: u8 = 0;
const EXIT_INVALID: u8 = 1;
const EXIT_INPUT_ERROR: u8 = 2;

/// Check JSON documents against field-level rule schemas
#[derive(Parser)]
#[command(name = "fieldrules")]
#[command(version)]
#[command(about = "Check JSON documents against field-level rule schemas", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document against a schema
    Check {
        /// Path to the JSON document
        document: PathBuf,

        /// Path to the rule schema
        schema: PathBuf,

        /// Report every violation instead of stopping at the first
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Print nothing; report through the exit code only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Load a schema and summarize the rules it defines
    Schema {
        /// Path to the rule schema
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_INPUT_ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check {
            document,
            schema,
            all,
            format,
            quiet,
        } => check_command(&document, &schema, all, format, quiet),
        Commands::Schema { path, format } => schema_command(&path, format),
    }
}

fn check_command(
    document: &Path,
    schema: &Path,
    all: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    let options = ValidateOptions {
        mode: if all { Mode::CollectAll } else { Mode::FirstFailure },
    };
    let outcome = validate_files(document, schema, &options);

    if !quiet {
        match format {
            OutputFormat::Json => {
                let report = json_report(document, schema, &outcome)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => print_text_outcome(&outcome),
        }
    }

    Ok(ExitCode::from(match outcome {
        Outcome::Passed => EXIT_VALID,
        Outcome::Invalid(_) => EXIT_INVALID,
        Outcome::Unreadable(_) => EXIT_INPUT_ERROR,
    }))
}

fn print_text_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Passed => println!("Valid"),
        Outcome::Invalid(result) => {
            for violation in result.violations() {
                println!("Validation failed: {}", violation);
            }
        }
        Outcome::Unreadable(err) => eprintln!("Validation failed: {}", err),
    }
}

fn json_report(document: &Path, schema: &Path, outcome: &Outcome) -> Result<Value> {
    let mut report = match outcome {
        Outcome::Passed => json!({ "valid": true, "violations": [] }),
        Outcome::Invalid(result) => {
            serde_json::to_value(result).context("Failed to serialize validation result")?
        }
        Outcome::Unreadable(err) => json!({
            "valid": false,
            "violations": [],
            "error": err.to_string(),
        }),
    };
    report["document"] = json!(document.display().to_string());
    report["schema"] = json!(schema.display().to_string());
    report["checked_at"] = json!(Utc::now().to_rfc3339());
    Ok(report)
}

fn schema_command(path: &Path, format: OutputFormat) -> Result<ExitCode> {
    let schema = match RuleSchema::from_path(path) {
        Ok(schema) => schema,
        Err(e) => {
            report_schema_error(&e);
            return Ok(ExitCode::from(EXIT_INPUT_ERROR));
        }
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&schema)?;
            println!("{}", json);
        }
        OutputFormat::Text => print_schema_summary(path, &schema),
    }
    Ok(ExitCode::from(EXIT_VALID))
}

fn report_schema_error(err: &LoadError) {
    eprintln!("Validation failed: {}", err);
}

fn print_schema_summary(path: &Path, schema: &RuleSchema) {
    println!("Schema is valid: {}", path.display());
    println!();

    let rules = schema.defined_rules();
    if rules.is_empty() {
        println!("No rules defined; every document passes.");
        return;
    }

    for kind in rules {
        match kind {
            RuleKind::RequiredFields => {
                println!("{}: {}", kind, schema.required_fields.join(", "));
            }
            RuleKind::AtLeastOneOf => {
                println!("{}: {}", kind, schema.at_least_one_of.join(", "));
            }
            RuleKind::EitherOneOrAnother => {
                if let Some(pair) = &schema.either_one_or_another {
                    println!("{}: {}", kind, describe_pair(pair));
                }
            }
            RuleKind::MutuallyExclusiveFields => {
                if let Some(pair) = &schema.mutually_exclusive_fields {
                    println!("{}: {}", kind, describe_pair(pair));
                }
            }
            RuleKind::FieldValues => {
                println!("{}:", kind);
                for (field, allowed) in &schema.field_values {
                    println!("  - {}: {} allowed", field, allowed.len());
                }
            }
        }
    }
}

fn describe_pair(pair: &FieldPair) -> String {
    let name = |field: &Option<String>| field.clone().unwrap_or_else(|| "(unset)".to_string());
    format!("{} / {}", name(&pair.field1), name(&pair.field2))
}
