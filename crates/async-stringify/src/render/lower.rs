// Lowering of a value graph onto serde_json's data model, following the
// reference encoder: hooks are applied once per value, cycles are rejected,
// unserializable members are dropped from objects and nulled in arrays.

use serde_json::{Map, Value as Json};

use crate::ancestors::Ancestors;
use crate::error::{Error, Result};
use crate::number::number_to_json;
use crate::shape::{Shape, classify};
use crate::value::Value;

pub(crate) fn lower(value: &Value, key: &str, ancestors: &Ancestors) -> Result<Option<Json>> {
    if let Shape::Hooked(object, hook) = classify(value) {
        let replaced = hook(&object);
        return lower_shape(classify(&replaced), &replaced, key, ancestors);
    }
    lower_shape(classify(value), value, key, ancestors)
}

fn lower_shape(
    shape: Shape,
    value: &Value,
    key: &str,
    ancestors: &Ancestors,
) -> Result<Option<Json>> {
    match shape {
        Shape::Unrepresentable(kind) => Err(Error::UnrepresentableValue { kind }),
        Shape::Unserializable => Ok(None),
        Shape::Scalar => Ok(Some(lower_scalar(value))),
        Shape::Sequence(array) => {
            let _guard = ancestors.enter(array.id(), key)?;
            let mut items = Vec::with_capacity(array.len());
            for index in 0..array.len() {
                let item = lower(&array.get(index), &index.to_string(), ancestors)?;
                items.push(item.unwrap_or(Json::Null));
            }
            Ok(Some(Json::Array(items)))
        }
        // A hook's output is not hooked a second time.
        Shape::Keyed(object) | Shape::Hooked(object, _) => {
            let _guard = ancestors.enter(object.id(), key)?;
            let mut map = Map::new();
            for name in object.own_enumerable_keys() {
                if let Some(member) = lower(&object.get(&name), &name, ancestors)? {
                    map.insert(name, member);
                }
            }
            Ok(Some(Json::Object(map)))
        }
    }
}

fn lower_scalar(value: &Value) -> Json {
    match value {
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => Json::String(s.clone()),
        _ => Json::Null,
    }
}
