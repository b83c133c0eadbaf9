use serde_json::{Map, Value};

use crate::error::{OutputError, ProcessError, SchemaError};
use crate::processor::ProcessOpts;
use crate::schema::PropertyDef;

/// Resolve the display label for `raw` under `definition`.
///
/// Returns `Ok(None)` when the property is not enum-typed, or when `raw` is
/// already one of the enum's labels (plain or `EnumName::` prefixed), so a
/// converted document can be processed again without change. A value that
/// matches no option is `UnknownEnumValue`.
pub fn resolve_label(
    definition: &PropertyDef<'_>,
    raw: &Value,
    opts: ProcessOpts,
) -> Result<Option<String>, ProcessError> {
    let type_name = definition.type_name()?;
    if !definition.is_enum()? {
        return Ok(None);
    }

    let enum_name = definition.enum_name()?;
    let stub = if opts.show_enum_stubs {
        let name = enum_name.ok_or_else(|| {
            SchemaError::new(
                definition.location("type"),
                format!("`{type_name}` does not name its enum"),
            )
        })?;
        format!("{name}::")
    } else {
        String::new()
    };

    let options = definition.enum_options()?;
    if let Some(label) = options
        .iter()
        .find_map(|(label, code)| same_code(code, raw).then_some(label))
    {
        return Ok(Some(format!("{stub}{label}")));
    }

    if is_known_label(options, enum_name, raw) {
        return Ok(None);
    }

    Err(OutputError::UnknownEnumValue {
        value: raw.clone(),
        type_name: type_name.to_string(),
    }
    .into())
}

// Numeric codes compare by value so `1`, `1.0` and a u64 `1` all match.
// Booleans count as 0 and 1.
fn same_code(code: &Value, raw: &Value) -> bool {
    match (code, raw) {
        (Value::Number(n), Value::Bool(b)) | (Value::Bool(b), Value::Number(n)) => {
            n.as_f64() == Some(if *b { 1.0 } else { 0.0 })
        }
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                x == y
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        _ => code == raw,
    }
}

fn is_known_label(options: &Map<String, Value>, enum_name: Option<&str>, raw: &Value) -> bool {
    let Value::String(text) = raw else {
        return false;
    };
    let text = text.as_str();
    let bare = enum_name
        .and_then(|name| text.strip_prefix(name))
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(text);
    options.contains_key(bare)
}
