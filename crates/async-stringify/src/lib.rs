#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod transform;
pub mod value;
pub mod engine;
pub mod render;

mod ancestors;
mod number;
mod shape;

pub use crate::engine::{resolve, resolve_with};
pub use crate::error::{BoxError, Error, Result};
pub use crate::options::{Options, Space};
pub use crate::render::{render, to_json};
pub use crate::transform::{Identity, Transform};
pub use crate::value::{Array, Function, Object, Property, PropertyKey, Symbol, Value};

use std::io::Write;

use tracing::debug;

/// Resolves `value` through `transform` and renders the result.
///
/// Yields `None` when the resolved root is undefined, a function or a
/// symbol.
pub async fn stringify<'a, T>(
    value: Value,
    transform: &'a T,
    space: Option<Space>,
) -> Result<Option<String>>
where
    T: Transform + ?Sized,
    T::Future: 'a,
{
    let options = Options {
        space,
        ..Options::default()
    };
    stringify_with(value, transform, &options).await
}

/// Like [`stringify`], taking indentation and the depth limit from `options`.
pub async fn stringify_with<'a, T>(
    value: Value,
    transform: &'a T,
    options: &Options,
) -> Result<Option<String>>
where
    T: Transform + ?Sized,
    T::Future: 'a,
{
    let resolved = engine::resolve_with(value, transform, options).await?;
    let text = render::render(&resolved, options.space.as_ref())?;
    debug!(
        root = resolved.type_name(),
        bytes = text.as_ref().map_or(0, String::len),
        "stringify finished"
    );
    Ok(text)
}

/// Like [`stringify_with`], writing the text to `writer`. Returns whether
/// anything was written.
pub async fn stringify_to_writer<'a, W, T>(
    writer: W,
    value: Value,
    transform: &'a T,
    options: &Options,
) -> Result<bool>
where
    W: Write,
    T: Transform + ?Sized,
    T::Future: 'a,
{
    let resolved = engine::resolve_with(value, transform, options).await?;
    render::render_to_writer(writer, &resolved, options.space.as_ref())
}
