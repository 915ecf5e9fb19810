//! One-shot classification of a value before the engine or the renderer
//! branches on it.

use crate::value::{Array, Object, SerializationHook, Value};

pub(crate) enum Shape {
    /// A scalar with no JSON mapping; carries the kind name.
    Unrepresentable(&'static str),
    /// Undefined, functions and symbols.
    Unserializable,
    /// Null, booleans, numbers and strings.
    Scalar,
    /// An object with its own or an inherited serialization hook.
    Hooked(Object, SerializationHook),
    Sequence(Array),
    Keyed(Object),
}

pub(crate) fn classify(value: &Value) -> Shape {
    match value {
        Value::BigInt(_) => Shape::Unrepresentable("BigInt"),
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => Shape::Unserializable,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
        Value::Array(array) => Shape::Sequence(array.clone()),
        Value::Object(object) => match object.hook() {
            Some(hook) => Shape::Hooked(object.clone(), hook),
            None => Shape::Keyed(object.clone()),
        },
    }
}
