use serde_json::Value;

use crate::enums::resolve_label;
use crate::error::ProcessError;
use crate::navigate::{self, NavContext, ROOT_LABEL, Target};
use crate::schema::{DISCRIMINATOR, TypeSchema, type_id_of};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOpts {
    /// Prefix labels with `EnumName::`.
    pub show_enum_stubs: bool,
}

#[derive(Debug, Clone)]
pub struct Processor {
    schema: TypeSchema,
    opts: ProcessOpts,
}

/// What a processing run hands back: the document, always, plus the failure
/// that stopped the run early, if any.
#[derive(Debug)]
pub struct Outcome {
    pub document: Value,
    pub error: Option<ProcessError>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// `Ok` with the fully processed document, or `Err` with the partial
    /// document and the failure that stopped the run.
    pub fn into_result(self) -> Result<Value, (Value, ProcessError)> {
        match self.error {
            None => Ok(self.document),
            Some(error) => Err((self.document, error)),
        }
    }
}

impl Processor {
    pub fn new(schema: TypeSchema, opts: ProcessOpts) -> Self {
        Self { schema, opts }
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn opts(&self) -> ProcessOpts {
        self.opts
    }

    /// Rewrite enum codes in `document` and return it.
    ///
    /// Never fails: a run that hits a problem logs it, stops, and returns the
    /// document as far as it got, with the error in `Outcome::error`.
    pub fn process<S: AsRef<str>>(
        &self,
        mut document: Value,
        descent: &[S],
        recurse_into: bool,
    ) -> Outcome {
        let error = match self.process_in_place(&mut document, descent, recurse_into) {
            Ok(()) => None,
            Err(ProcessError::Output(e)) => {
                tracing::error!("{e}");
                Some(ProcessError::Output(e))
            }
            Err(e) => {
                tracing::error!("unexpected error while processing: {e}");
                Some(e)
            }
        };
        Outcome { document, error }
    }

    /// Fallible form of [`Processor::process`]. On error the document keeps
    /// every rewrite made before the failure.
    pub fn process_in_place<S: AsRef<str>>(
        &self,
        document: &mut Value,
        descent: &[S],
        recurse_into: bool,
    ) -> Result<(), ProcessError> {
        let root = NavContext::root(document)?;
        let mut targets = match navigate::descend(root, descent)? {
            Target::Object(ctx) => vec![ctx],
            Target::List(entries) => entries,
        };

        for target in &mut targets {
            self.rewrite_object(target)?;
        }
        if recurse_into {
            for target in &mut targets {
                self.walk(target)?;
            }
        }
        Ok(())
    }

    /// Rewrite every enum-typed property of one object, leaving nested
    /// children alone.
    pub fn rewrite_object(&self, object: &mut NavContext<'_>) -> Result<(), ProcessError> {
        if object.data().keys().all(|key| key == DISCRIMINATOR) {
            return Ok(());
        }

        let type_id = type_id_of(object.peek(DISCRIMINATOR)?);
        let class = self.schema.class(&type_id)?;
        tracing::debug!(
            object = object.label().unwrap_or(ROOT_LABEL),
            type_id = %type_id,
            "rewriting object"
        );

        let (_, data) = object.parts_mut();
        for (name, value) in data.iter_mut() {
            if name == DISCRIMINATOR {
                continue;
            }
            let definition = class.property(name)?;
            if let Some(label) = resolve_label(&definition, value, self.opts)? {
                tracing::trace!(property = %name, from = %value, to = %label, "resolved enum");
                *value = Value::String(label);
            }
        }
        Ok(())
    }

    /// Visit every object reachable from `object` through properties and
    /// array elements, rewriting each one before descending into it.
    /// Non-object array elements and scalars end the walk.
    pub fn walk(&self, object: &mut NavContext<'_>) -> Result<(), ProcessError> {
        let (label, data) = object.parts_mut();
        for (key, value) in data.iter_mut() {
            match value {
                Value::Object(map) => {
                    let child_label = navigate::child_label(label, key);
                    let mut child = NavContext::new(map, Some(child_label));
                    self.rewrite_object(&mut child)?;
                    self.walk(&mut child)?;
                }
                Value::Array(items) => {
                    let base = navigate::child_label(label, key);
                    for (index, item) in items.iter_mut().enumerate() {
                        if let Value::Object(map) = item {
                            let child_label = format!("{base}[{index}]");
                            let mut child = NavContext::new(map, Some(child_label));
                            self.rewrite_object(&mut child)?;
                            self.walk(&mut child)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
