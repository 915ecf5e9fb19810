//! Synchronous reference encoder for resolved value trees.
//!
//! Values are lowered onto `serde_json::Value` and written through
//! `serde_json`, compact or with the requested indentation.

mod lower;
pub mod writer;

use std::io::{self, Write};

use serde_json::Value as Json;

use crate::ancestors::Ancestors;
use crate::error::{Error, Result};
use crate::options::Space;
use crate::value::Value;

/// Lowers `value` to JSON. `None` when the value itself is undefined, a
/// function or a symbol.
pub fn to_json(value: &Value) -> Result<Option<Json>> {
    let ancestors = Ancestors::new(None);
    lower::lower(value, "", &ancestors)
}

/// Renders `value` as JSON text, or `None` when it has no JSON form.
pub fn render(value: &Value, space: Option<&Space>) -> Result<Option<String>> {
    let Some(json) = to_json(value)? else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    writer::write_json(&mut buf, &json, space)?;
    let text = String::from_utf8(buf)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(Some(text))
}

/// Writes the rendered text of `value` to `writer`. Returns whether anything
/// was written.
pub fn render_to_writer<W: Write>(writer: W, value: &Value, space: Option<&Space>) -> Result<bool> {
    match to_json(value)? {
        Some(json) => {
            writer::write_json(writer, &json, space)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
