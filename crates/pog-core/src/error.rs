//! Error types for schema lookup, document navigation, and file handling.
//!
//! `OutputError` is the "expected" class: something about the document or its
//! relation to the schema is not what the processor assumed, and the message
//! says where. `SchemaError` is the "unexpected" class: the schema itself is
//! missing structure the processor relies on. Both are folded into
//! `ProcessError`, which is what the orchestrator reports.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// What a strict lookup expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A single JSON object.
    Object,
    /// An array whose entries are all objects.
    ObjectEntries,
}

/// Reportable failures raised while walking a document.
#[derive(Error, Debug)]
pub enum OutputError {
    /// A requested key is absent from an object.
    #[error("{}", missing_key_message(.parent.as_deref(), .key, .available))]
    MissingKey {
        /// Label of the object that was searched, when known.
        parent: Option<String>,
        key: String,
        /// Keys the object does have, in document order.
        available: Vec<String>,
    },

    /// A value was a scalar or a mixed list where objects were required.
    #[error("{}", unexpected_shape_message(.path, .expected))]
    UnexpectedShape { path: String, expected: Expected },

    /// An object's `$__type` has no entry in the schema's class table.
    #[error("type {type_id} has no entry in the type schema")]
    UnknownType { type_id: String },

    /// A property present on an object has no definition in its type entry.
    #[error("type {type_id} has no definition for property {property}")]
    UnknownProperty { type_id: String, property: String },

    /// An enum-typed property holds a value that matches no enum option.
    #[error("could not find enum name for value {value} of type {type_name}")]
    UnknownEnumValue { value: Value, type_name: String },
}

/// The schema is missing structure that every lookup depends on.
#[derive(Error, Debug)]
#[error("malformed type schema at {location}: {reason}")]
pub struct SchemaError {
    /// Dotted location inside the schema, e.g. `classes.12.properties.hp`.
    pub location: String,
    pub reason: String,
}

impl SchemaError {
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Anything that can stop a processing run.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ProcessError {
    /// True for the document-level failures the processor anticipates.
    pub fn is_output_error(&self) -> bool {
        matches!(self, ProcessError::Output(_))
    }

    pub fn as_output_error(&self) -> Option<&OutputError> {
        match self {
            ProcessError::Output(e) => Some(e),
            ProcessError::Schema(_) => None,
        }
    }
}

/// Reading or writing JSON files.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

fn missing_key_message(parent: Option<&str>, key: &str, available: &[String]) -> String {
    let keys = available.join(", ");
    match parent {
        Some(parent) => format!("{parent} does not have key {key}\navailable keys: [{keys}]"),
        None => format!("no key {key} found\navailable keys: [{keys}]"),
    }
}

fn unexpected_shape_message(path: &str, expected: &Expected) -> String {
    match expected {
        Expected::Object => format!("{path} was not an object when one was expected"),
        Expected::ObjectEntries => {
            format!("{path}'s entries were not objects when they were expected")
        }
    }
}
