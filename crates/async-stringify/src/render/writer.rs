use std::io::Write;

use serde::Serialize;
use serde_json::Value as Json;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Result, options::Space};

/// Writes `json` compact, or one member per line with `space`'s indent unit.
pub fn write_json<W: Write>(writer: W, json: &Json, space: Option<&Space>) -> Result<()> {
    match space.and_then(Space::indent_unit) {
        None => serde_json::to_writer(writer, json)?,
        Some(unit) => {
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut ser = Serializer::with_formatter(writer, formatter);
            json.serialize(&mut ser)?;
        }
    }
    Ok(())
}
