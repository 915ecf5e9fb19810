//! The asynchronous per-node replacer.

use core::future::Future;

use futures::future::{self, ErrInto, Ready, TryFuture, TryFutureExt};

use crate::error::BoxError;
use crate::value::Value;

/// Produces the replacement for one node.
///
/// `context` is the container holding the node (a synthetic `{"": root}`
/// object for the root), `key` is the property name or decimal index and
/// `value` is the node's current value. Returning [`Value::Undefined`] drops
/// an object member; the engine awaits each call before starting the next.
///
/// Implemented for every `Fn(Value, String, Value) -> impl Future<Output =
/// Result<Value, E>>` with `E: Into<BoxError>`.
pub trait Transform {
    type Future: Future<Output = Result<Value, BoxError>>;

    fn call(&self, context: Value, key: String, value: Value) -> Self::Future;
}

impl<F, Fut> Transform for F
where
    F: Fn(Value, String, Value) -> Fut,
    Fut: TryFuture<Ok = Value>,
    Fut::Error: Into<BoxError>,
{
    type Future = ErrInto<Fut, BoxError>;

    fn call(&self, context: Value, key: String, value: Value) -> Self::Future {
        self(context, key, value).err_into()
    }
}

/// Returns every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    type Future = Ready<Result<Value, BoxError>>;

    fn call(&self, _context: Value, _key: String, value: Value) -> Self::Future {
        future::ready(Ok(value))
    }
}
