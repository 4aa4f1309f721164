//! Schema document loading and operation discovery.
//!
//! One protocol operation is a `<Operation>Request.json` /
//! `<Operation>Response.json` pair in the input directory. An optional
//! `list.json` groups operation names by initiating role for downstream
//! role-based emission; the core only needs the pairs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{GenerateError, SchemaError};

const REQUEST_SUFFIX: &str = "Request.json";
const RESPONSE_SUFFIX: &str = "Response.json";
const ROLE_LIST_FILE: &str = "list.json";

/// One discovered protocol operation and its document paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub name: String,
    pub request_path: PathBuf,
    pub response_path: PathBuf,
}

/// Load a schema document from a file path.
///
/// # Errors
///
/// Returns `SchemaError::FileNotFound` if the file doesn't exist,
/// `SchemaError::ReadError` if it can't be read, or
/// `SchemaError::InvalidJson` if it isn't valid JSON.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SchemaError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Discover operations by scanning `input_dir` for `*Request.json` files.
///
/// The sibling response path is derived, not checked; a missing response
/// document surfaces as a per-operation failure when the pair is loaded.
/// Results are sorted by operation name so runs are deterministic.
///
/// # Errors
///
/// Returns `GenerateError::InputDirNotFound` or `GenerateError::ReadDir`
/// if the directory is missing or unreadable.
pub fn discover_operations(input_dir: &Path) -> Result<Vec<Operation>, GenerateError> {
    if !input_dir.is_dir() {
        return Err(GenerateError::InputDirNotFound {
            path: input_dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(input_dir).map_err(|source| GenerateError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut operations = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(name) = file_name.strip_suffix(REQUEST_SUFFIX) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        operations.push(Operation {
            name: name.to_string(),
            request_path: path.clone(),
            response_path: input_dir.join(format!("{name}{RESPONSE_SUFFIX}")),
        });
    }

    operations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(operations)
}

/// Load the optional `list.json` role grouping: role name → operation names.
///
/// Returns `Ok(None)` when the file is absent.
///
/// # Errors
///
/// Returns `SchemaError::InvalidJson` if the file exists but isn't a map of
/// role names to operation-name arrays.
pub fn load_role_groups(
    input_dir: &Path,
) -> Result<Option<BTreeMap<String, Vec<String>>>, SchemaError> {
    let path = input_dir.join(ROLE_LIST_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let document = load_document(&path)?;
    let groups = serde_json::from_value(document)
        .map_err(|source| SchemaError::InvalidJson { path, source })?;
    Ok(Some(groups))
}
