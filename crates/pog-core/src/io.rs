// JSON file helpers used by the CLI: load, pretty-write, and batch processing
// of every `*.json` under a directory.
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use walkdir::WalkDir;

use crate::error::FileError;
use crate::processor::{Outcome, Processor};

pub fn load_json(path: &Path) -> Result<Value, FileError> {
    let data = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| FileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json_to_file(path: &Path, value: &Value) -> Result<(), FileError> {
    let s = serde_json::to_string_pretty(value).map_err(|e| FileError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, s).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Every `*.json` file under `dir`, recursively, in path order.
pub fn find_json_files(dir: &Path) -> Result<Vec<PathBuf>, FileError> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| FileError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let p = entry.path();
        if entry.file_type().is_file() && p.extension().and_then(|s| s.to_str()) == Some("json") {
            out.push(p.to_path_buf());
        }
    }
    Ok(out)
}

/// Load and process a single file.
pub fn process_file<S: AsRef<str>>(
    processor: &Processor,
    path: &Path,
    descent: &[S],
    recurse_into: bool,
) -> Result<Outcome, FileError> {
    let document = load_json(path)?;
    Ok(processor.process(document, descent, recurse_into))
}

/// Result of a directory run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Object keyed by path relative to the processed directory.
    pub document: Value,
    /// Relative paths of files that failed to load or stopped early.
    pub failed_files: Vec<String>,
}

/// Process every JSON file under `dir` into one object keyed by relative path.
/// Files that fail to load become `{"$error": "..."}`; processing failures
/// keep the partial document. `exclude` skips one file, normally the schema.
pub fn process_dir<S: AsRef<str>>(
    processor: &Processor,
    dir: &Path,
    descent: &[S],
    recurse_into: bool,
    exclude: Option<&Path>,
) -> Result<BatchOutcome, FileError> {
    let excluded = exclude.map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));
    let mut out = Map::new();
    let mut failed_files = Vec::new();
    for file in find_json_files(dir)? {
        if let Some(excluded) = &excluded
            && file.canonicalize().unwrap_or_else(|_| file.clone()) == *excluded
        {
            continue;
        }
        let name = file
            .strip_prefix(dir)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        let _span = tracing::warn_span!("file", name = %name).entered();
        let entry = match process_file(processor, &file, descent, recurse_into) {
            Ok(outcome) => {
                if !outcome.is_ok() {
                    failed_files.push(name.clone());
                }
                outcome.document
            }
            Err(e) => {
                tracing::warn!("{e}");
                failed_files.push(name.clone());
                json!({ "$error": e.to_string() })
            }
        };
        out.insert(name, entry);
    }
    Ok(BatchOutcome {
        document: Value::Object(out),
        failed_files,
    })
}
