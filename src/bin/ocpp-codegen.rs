//! OCPP codegen CLI
//!
//! Command-line interface for compiling request/response schema pairs into
//! generated message code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ocpp_codegen::{check, generate, GenerateOptions, RunReport};

#[derive(Parser)]
#[command(name = "ocpp-codegen")]
#[command(about = "Compile OCPP JSON schema message definitions into generated code")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for every request/response schema pair
    Generate {
        /// Directory containing <Operation>Request.json / <Operation>Response.json pairs
        #[arg(long, short)]
        input: PathBuf,

        /// Output directory (receives types/ and messages/ subdirectories)
        #[arg(long, short)]
        output: PathBuf,

        /// Directory containing enum.hbs, type.hbs and message.hbs
        #[arg(long, short)]
        templates: PathBuf,

        /// Namespace string handed to every template context
        #[arg(long, short)]
        namespace: String,

        /// File extension for generated files
        #[arg(long, default_value = "rs")]
        extension: String,

        /// Suppress per-operation output, only show failures
        #[arg(long, short)]
        quiet: bool,
    },

    /// Parse and assemble every operation without writing output
    Check {
        /// Directory containing schema pairs (and optionally list.json)
        input: PathBuf,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            templates,
            namespace,
            extension,
            quiet,
        } => run_generate(
            GenerateOptions {
                input_dir: input,
                output_dir: output,
                templates_dir: templates,
                namespace,
                extension,
            },
            quiet,
        ),

        Commands::Check { input, format } => run_check(&input, &format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_generate(options: GenerateOptions, quiet: bool) -> Result<(), u8> {
    if !quiet {
        println!("Generating from {} ...\n", options.input_dir.display());
    }

    let report = generate(&options).map_err(|e| {
        eprintln!("Error: {e}");
        e.exit_code() as u8
    })?;

    print_report(&report, quiet, "generated");

    if report.is_ok() {
        Ok(())
    } else {
        Err(1)
    }
}

fn run_check(input: &Path, format: &str) -> Result<(), u8> {
    let report = check(input).map_err(|e| {
        eprintln!("Error: {e}");
        e.exit_code() as u8
    })?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!("Checking {} ...\n", input.display());
        print_report(&report, false, "passed");
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(1)
    }
}

/// Per-operation result lines and a final colored summary.
fn print_report(report: &RunReport, quiet: bool, verb: &str) {
    for result in &report.results {
        match &result.error {
            None => {
                if !quiet {
                    if result.files_written > 0 {
                        println!(
                            "  \x1b[32m✓\x1b[0m {} ({} files)",
                            result.name, result.files_written
                        );
                    } else {
                        println!("  \x1b[32m✓\x1b[0m {}", result.name);
                    }
                }
            }
            Some(error) => {
                println!("  \x1b[31m✗\x1b[0m {}: {}", result.name, error);
            }
        }
    }

    if !quiet || !report.is_ok() {
        println!();
    }
    if report.is_ok() {
        println!(
            "\x1b[32m✓ {} operations, all {}\x1b[0m",
            report.operations, verb
        );
    } else {
        println!(
            "\x1b[31m✗ {} operations: {} {}, {} failed\x1b[0m",
            report.operations, report.succeeded, verb, report.failed
        );
    }
}
