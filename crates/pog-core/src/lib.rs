//! pog-core: schema-driven enum label substitution for serialized game JSON
//!
//! A document exported by the game tags its objects with `$__type`; a
//! companion type schema says which properties of each type are enums and
//! how their integer codes map to names. This crate walks the document and
//! replaces those codes with the names:
//! - `schema`: lazy, read-only access to the type schema
//! - `navigate`: path-aware lookup with precise error labels
//! - `enums`: per-property code -> label resolution
//! - `processor`: object rewriter, tree walker, and the never-failing entry point
//! - `io`: JSON file loading/writing and directory batch runs
//!
pub mod enums;
pub mod error;
pub mod io;
pub mod navigate;
pub mod processor;
pub mod schema;

pub use error::{Expected, FileError, OutputError, ProcessError, SchemaError};
pub use io::{
    BatchOutcome, find_json_files, load_json, process_dir, process_file, write_json_to_file,
};
pub use navigate::{NavContext, Target, View, pointer_segments};
pub use processor::{Outcome, ProcessOpts, Processor};
pub use schema::{DISCRIMINATOR, TypeSchema};
