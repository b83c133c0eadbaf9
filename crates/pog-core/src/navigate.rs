// Path-aware lookup into a mutable serde_json document.
// - `NavContext` pairs an object with the dotted label it was reached by, so
//   lookup failures can say `weapon.loadout does not have key ammoType`.
// - `get` is the permissive lookup: objects and arrays come back as views,
//   anything else as the raw value.
// - `get_strict` only accepts an object or an array made purely of objects.
// - `descend` follows a key path from the root using strict lookups.
use serde_json::{Map, Value};

use crate::error::{Expected, OutputError};

/// Label used in messages for the top of the document.
pub const ROOT_LABEL: &str = "document";

#[derive(Debug)]
pub struct NavContext<'a> {
    data: &'a mut Map<String, Value>,
    label: Option<String>,
}

/// Result of a permissive lookup.
#[derive(Debug)]
pub enum View<'a> {
    Object(NavContext<'a>),
    List(Vec<Entry<'a>>),
    Other(&'a mut Value),
}

/// One array element of a permissive lookup.
#[derive(Debug)]
pub enum Entry<'a> {
    Object(NavContext<'a>),
    Other(&'a mut Value),
}

/// Result of a strict lookup: objects only.
#[derive(Debug)]
pub enum Target<'a> {
    Object(NavContext<'a>),
    List(Vec<NavContext<'a>>),
}

impl<'a> NavContext<'a> {
    pub fn new(data: &'a mut Map<String, Value>, label: Option<String>) -> Self {
        Self { data, label }
    }

    /// Wrap the top of a document. An array root is accepted when every entry
    /// is an object.
    pub fn root(document: &'a mut Value) -> Result<Target<'a>, OutputError> {
        match document {
            Value::Object(map) => Ok(Target::Object(NavContext::new(map, None))),
            Value::Array(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for (index, item) in items.iter_mut().enumerate() {
                    match item {
                        Value::Object(map) => entries.push(NavContext::new(
                            map,
                            Some(format!("{ROOT_LABEL}[{index}]")),
                        )),
                        _ => {
                            return Err(OutputError::UnexpectedShape {
                                path: ROOT_LABEL.to_string(),
                                expected: Expected::ObjectEntries,
                            });
                        }
                    }
                }
                Ok(Target::List(entries))
            }
            _ => Err(OutputError::UnexpectedShape {
                path: ROOT_LABEL.to_string(),
                expected: Expected::Object,
            }),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn data(&self) -> &Map<String, Value> {
        &*self.data
    }

    /// Label and object borrowed at once, for callers that mutate while
    /// building child labels.
    pub fn parts_mut(&mut self) -> (Option<&str>, &mut Map<String, Value>) {
        (self.label.as_deref(), &mut *self.data)
    }

    /// Label a child reached through `key` would carry.
    pub fn child_label(&self, key: &str) -> String {
        child_label(self.label(), key)
    }

    /// Borrow the raw value at `key` without consuming the context.
    pub fn peek(&self, key: &str) -> Result<&Value, OutputError> {
        self.data.get(key).ok_or_else(|| self.missing(key))
    }

    /// Permissive lookup.
    pub fn get(self, key: &str) -> Result<View<'a>, OutputError> {
        if !self.data.contains_key(key) {
            return Err(self.missing(key));
        }
        let label = self.child_label(key);
        let NavContext { data, .. } = self;
        let value = &mut data[key];
        Ok(match value {
            Value::Object(map) => View::Object(NavContext::new(map, Some(label))),
            Value::Array(items) => View::List(
                items
                    .iter_mut()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::Object(map) => {
                            let label = format!("{label}[{index}]");
                            Entry::Object(NavContext::new(map, Some(label)))
                        }
                        other => Entry::Other(other),
                    })
                    .collect(),
            ),
            other => View::Other(other),
        })
    }

    /// Strict lookup: the value must be an object or an array of objects.
    pub fn get_strict(self, key: &str) -> Result<Target<'a>, OutputError> {
        let path = self.child_label(key);
        match self.get(key)? {
            View::Object(ctx) => Ok(Target::Object(ctx)),
            View::List(entries) => {
                let mut objects = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        Entry::Object(ctx) => objects.push(ctx),
                        Entry::Other(_) => {
                            return Err(OutputError::UnexpectedShape {
                                path,
                                expected: Expected::ObjectEntries,
                            });
                        }
                    }
                }
                Ok(Target::List(objects))
            }
            View::Other(_) => Err(OutputError::UnexpectedShape {
                path,
                expected: Expected::Object,
            }),
        }
    }

    fn missing(&self, key: &str) -> OutputError {
        OutputError::MissingKey {
            parent: self.label.clone(),
            key: key.to_string(),
            available: self.data.keys().cloned().collect(),
        }
    }
}

/// Follow `path` from `start`, one strict lookup per segment. Each segment is
/// looked up in the node reached by the previous one.
pub fn descend<'a, S: AsRef<str>>(
    start: Target<'a>,
    path: &[S],
) -> Result<Target<'a>, OutputError> {
    let mut current = start;
    let mut reached: Option<String> = None;
    for segment in path {
        let key = segment.as_ref();
        current = match current {
            Target::Object(ctx) => {
                tracing::debug!(from = ctx.label().unwrap_or(ROOT_LABEL), key, "descending");
                ctx.get_strict(key)?
            }
            Target::List(_) => {
                return Err(OutputError::UnexpectedShape {
                    path: reached.unwrap_or_else(|| ROOT_LABEL.to_string()),
                    expected: Expected::Object,
                });
            }
        };
        reached = Some(child_label(reached.as_deref(), key));
    }
    Ok(current)
}

pub fn child_label(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{key}"),
        None => key.to_string(),
    }
}

/// Split an RFC 6901 pointer (`/inventory/items`) into descent segments.
/// The empty pointer is the root; `/` is the key `""`. A missing leading
/// slash is tolerated (`inventory` reads as `/inventory`).
pub fn pointer_segments(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    trimmed.split('/').map(unescape_token).collect()
}

fn unescape_token(tok: &str) -> String {
    let s = tok.replace("~1", "/");
    s.replace("~0", "~")
}
