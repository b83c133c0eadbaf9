//! Read-only access to the type schema.
//!
//! The schema is kept as the decoded JSON value and never validated up front.
//! Each accessor checks only the structure it needs, so a schema with one
//! broken class still processes documents that never reference it.
//!
//! Expected layout:
//!
//! ```json
//! {"classes": {"<type-id>": {"properties": {
//!     "<name>": {"type": "enum Kind", "enum_options": {"A": 0}}
//! }}}}
//! ```

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{FileError, OutputError, ProcessError, SchemaError};

/// Reserved key naming an object's schema entry.
pub const DISCRIMINATOR: &str = "$__type";

/// Prefix of the `type` string of enum-valued properties.
pub const ENUM_PREFIX: &str = "enum";

#[derive(Debug, Clone)]
pub struct TypeSchema {
    root: Value,
}

/// One entry of the `classes` table.
#[derive(Debug, Clone, Copy)]
pub struct ClassDef<'a> {
    type_id: &'a str,
    properties: &'a Map<String, Value>,
}

/// One property definition inside a class entry.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDef<'a> {
    type_id: &'a str,
    name: &'a str,
    definition: &'a Value,
}

impl TypeSchema {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        crate::io::load_json(path).map(Self::new)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    fn classes(&self) -> Result<&Map<String, Value>, SchemaError> {
        self.root
            .get("classes")
            .ok_or_else(|| SchemaError::new("classes", "missing"))?
            .as_object()
            .ok_or_else(|| SchemaError::new("classes", "not an object"))
    }

    /// Look up the class entry for a stringified type id.
    pub fn class(&self, type_id: &str) -> Result<ClassDef<'_>, ProcessError> {
        let (type_id, entry) = self
            .classes()?
            .get_key_value(type_id)
            .ok_or_else(|| OutputError::UnknownType {
                type_id: type_id.to_string(),
            })?;
        let location = format!("classes.{type_id}.properties");
        let properties = entry
            .get("properties")
            .ok_or_else(|| SchemaError::new(location.as_str(), "missing"))?
            .as_object()
            .ok_or_else(|| SchemaError::new(location.as_str(), "not an object"))?;
        Ok(ClassDef {
            type_id: type_id.as_str(),
            properties,
        })
    }
}

impl<'a> ClassDef<'a> {
    pub fn type_id(&self) -> &'a str {
        self.type_id
    }

    pub fn property(&self, name: &str) -> Result<PropertyDef<'a>, OutputError> {
        let (name, definition) =
            self.properties
                .get_key_value(name)
                .ok_or_else(|| OutputError::UnknownProperty {
                    type_id: self.type_id.to_string(),
                    property: name.to_string(),
                })?;
        Ok(PropertyDef {
            type_id: self.type_id,
            name: name.as_str(),
            definition,
        })
    }
}

impl<'a> PropertyDef<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The raw `type` string, e.g. `int` or `enum DamageType`.
    pub fn type_name(&self) -> Result<&'a str, SchemaError> {
        self.definition
            .get("type")
            .ok_or_else(|| SchemaError::new(self.location("type"), "missing"))?
            .as_str()
            .ok_or_else(|| SchemaError::new(self.location("type"), "not a string"))
    }

    pub fn is_enum(&self) -> Result<bool, SchemaError> {
        Ok(self.type_name()?.starts_with(ENUM_PREFIX))
    }

    /// Second whitespace-separated token of the `type` string.
    pub fn enum_name(&self) -> Result<Option<&'a str>, SchemaError> {
        Ok(self.type_name()?.split_whitespace().nth(1))
    }

    /// The label -> code table of an enum-typed property.
    pub fn enum_options(&self) -> Result<&'a Map<String, Value>, SchemaError> {
        self.definition
            .get("enum_options")
            .ok_or_else(|| SchemaError::new(self.location("enum_options"), "missing"))?
            .as_object()
            .ok_or_else(|| SchemaError::new(self.location("enum_options"), "not an object"))
    }

    pub(crate) fn location(&self, field: &str) -> String {
        format!("classes.{}.properties.{}.{field}", self.type_id, self.name)
    }
}

/// Stringify a discriminator value the way schema keys are written:
/// strings as-is, anything else as its JSON text (`7` -> `"7"`).
pub fn type_id_of(discriminator: &Value) -> String {
    match discriminator {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
