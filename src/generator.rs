//! Generation runs: per-operation orchestration, reports, output writing.
//!
//! A run loads the templates once, discovers operations, then assembles and
//! renders each operation independently. A malformed schema pair aborts only
//! its own operation; the run continues and the report carries the failure.
//! Missing shared resources (input directory, templates) abort the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assembler::assemble_message;
use crate::error::GenerateError;
use crate::loader::{discover_operations, load_document, load_role_groups, Operation};
use crate::render::Renderer;
use crate::types::Message;

const TYPES_SUBDIR: &str = "types";
const MESSAGES_SUBDIR: &str = "messages";

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory containing `<Operation>Request.json` / `<Operation>Response.json` pairs.
    pub input_dir: PathBuf,
    /// Directory receiving `types/` and `messages/` output trees.
    pub output_dir: PathBuf,
    /// Directory containing `enum.hbs`, `type.hbs` and `message.hbs`.
    pub templates_dir: PathBuf,
    /// Namespace string handed to every template context.
    pub namespace: String,
    /// File extension for generated files.
    pub extension: String,
}

/// Outcome of one operation within a run.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub files_written: usize,
}

impl OperationResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated outcome of a generate or check run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub operations: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<OperationResult>,
}

impl RunReport {
    /// Returns true if every operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.failed == 0
    }

    fn from_results(results: Vec<OperationResult>) -> Self {
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        Self {
            operations: results.len(),
            succeeded: results.len() - failed,
            failed,
            results,
        }
    }
}

/// Generate code for every operation in the input directory.
///
/// Shared types are emitted once per run: the first operation to define a
/// name renders it, later same-named definitions are skipped.
///
/// # Errors
///
/// Returns `GenerateError` only for run-level failures (templates, input
/// directory, output directories). Per-operation failures are reported in
/// the returned [`RunReport`] instead.
pub fn generate(options: &GenerateOptions) -> Result<RunReport, GenerateError> {
    let renderer = Renderer::from_dir(&options.templates_dir)?;
    let operations = discover_operations(&options.input_dir)?;

    let types_dir = options.output_dir.join(TYPES_SUBDIR);
    let messages_dir = options.output_dir.join(MESSAGES_SUBDIR);
    create_dir(&types_dir)?;
    create_dir(&messages_dir)?;

    let mut emitted: HashSet<String> = HashSet::new();
    let mut results = Vec::with_capacity(operations.len());

    for operation in &operations {
        let outcome = generate_operation(
            operation,
            &renderer,
            options,
            &types_dir,
            &messages_dir,
            &mut emitted,
        );
        results.push(match outcome {
            Ok(files_written) => OperationResult {
                name: operation.name.clone(),
                error: None,
                files_written,
            },
            Err(e) => OperationResult {
                name: operation.name.clone(),
                error: Some(e.to_string()),
                files_written: 0,
            },
        });
    }

    Ok(RunReport::from_results(results))
}

/// Assemble every operation without writing output.
///
/// When `list.json` is present, operations it lists without a schema pair on
/// disk are reported as failures.
///
/// # Errors
///
/// Returns `GenerateError` for a missing input directory or an unreadable
/// `list.json` (shared resources); per-operation failures land in the report.
pub fn check(input_dir: &Path) -> Result<RunReport, GenerateError> {
    let operations = discover_operations(input_dir)?;
    let role_groups = load_role_groups(input_dir)?;

    let mut known: HashSet<String> = HashSet::new();
    let mut results = Vec::with_capacity(operations.len());

    for operation in &operations {
        let outcome = assemble_operation(operation, &known);
        results.push(match outcome {
            Ok(message) => {
                for ty in &message.local_types {
                    known.insert(ty.name.clone());
                }
                OperationResult {
                    name: operation.name.clone(),
                    error: None,
                    files_written: 0,
                }
            }
            Err(e) => OperationResult {
                name: operation.name.clone(),
                error: Some(e.to_string()),
                files_written: 0,
            },
        });
    }

    if let Some(groups) = role_groups {
        let discovered: HashSet<&str> = operations.iter().map(|o| o.name.as_str()).collect();
        for (role, names) in &groups {
            for name in names {
                if !discovered.contains(name.as_str()) {
                    results.push(OperationResult {
                        name: name.clone(),
                        error: Some(format!(
                            "listed in list.json under \"{role}\" but no schema pair found"
                        )),
                        files_written: 0,
                    });
                }
            }
        }
    }

    Ok(RunReport::from_results(results))
}

fn assemble_operation(
    operation: &Operation,
    known: &HashSet<String>,
) -> Result<Message, GenerateError> {
    let request = load_document(&operation.request_path)?;
    let response = load_document(&operation.response_path)?;
    let message = assemble_message(&operation.name, &request, &response)?;
    message.verify_references(known)?;
    Ok(message)
}

fn generate_operation(
    operation: &Operation,
    renderer: &Renderer,
    options: &GenerateOptions,
    types_dir: &Path,
    messages_dir: &Path,
    emitted: &mut HashSet<String>,
) -> Result<usize, GenerateError> {
    let message = assemble_operation(operation, emitted)?;

    let mut files_written = 0;

    for ty in &message.local_types {
        if emitted.contains(&ty.name) {
            continue;
        }
        let text = renderer.render_local_type(ty, &message, &options.namespace)?;
        let path = types_dir.join(format!("{}.{}", ty.name, options.extension));
        write_file(&path, &text)?;
        emitted.insert(ty.name.clone());
        files_written += 1;
    }

    let text = renderer.render_message(&message, &options.namespace)?;
    let path = messages_dir.join(format!("{}.{}", message.name, options.extension));
    write_file(&path, &text)?;
    files_written += 1;

    Ok(files_written)
}

fn create_dir(path: &Path) -> Result<(), GenerateError> {
    std::fs::create_dir_all(path).map_err(|source| GenerateError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    std::fs::write(path, content).map_err(|source| GenerateError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}
