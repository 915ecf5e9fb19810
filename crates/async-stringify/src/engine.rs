//! Recursive resolution of a value graph through an asynchronous transform.
//!
//! Traversal is depth-first and left to right. Each transform call is awaited
//! before the next one starts, so siblings are never transformed
//! concurrently.

use futures::future::{FutureExt, LocalBoxFuture};
use tracing::trace;

use crate::ancestors::Ancestors;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::shape::{Shape, classify};
use crate::transform::Transform;
use crate::value::{Array, Object, Value};

/// Runs `transform` over every node of `root` and returns the resolved tree.
///
/// The root itself is transformed first, under the empty key and with a
/// synthetic `{"": root}` object as context. Containers in the result are
/// fresh; hook outputs are embedded as the hook returned them.
pub async fn resolve<'a, T>(root: Value, transform: &'a T) -> Result<Value>
where
    T: Transform + ?Sized,
    T::Future: 'a,
{
    resolve_with(root, transform, &Options::default()).await
}

/// Like [`resolve`], failing once nesting exceeds `options.max_depth`.
pub async fn resolve_with<'a, T>(root: Value, transform: &'a T, options: &Options) -> Result<Value>
where
    T: Transform + ?Sized,
    T::Future: 'a,
{
    let walker = Walker {
        transform,
        ancestors: Ancestors::new(options.max_depth),
    };
    let holder = Object::new();
    holder.set("", root.clone());
    walker
        .resolve_node(Value::Object(holder), String::new(), root)
        .await
}

struct Walker<'a, T: ?Sized> {
    transform: &'a T,
    ancestors: Ancestors,
}

impl<'a, T> Walker<'a, T>
where
    T: Transform + ?Sized,
    T::Future: 'a,
{
    fn resolve_node<'s>(
        &'s self,
        context: Value,
        key: String,
        value: Value,
    ) -> LocalBoxFuture<'s, Result<Value>> {
        async move {
            trace!(key = %key, depth = self.ancestors.depth(), "transforming node");
            let replaced = self
                .transform
                .call(context, key.clone(), value)
                .await
                .map_err(Error::Transform)?;

            match classify(&replaced) {
                Shape::Unrepresentable(kind) => Err(Error::UnrepresentableValue { kind }),
                Shape::Unserializable | Shape::Scalar => Ok(replaced),
                // Hook output is taken as-is: no transform, no cycle check.
                Shape::Hooked(object, hook) => Ok(hook(&object)),
                Shape::Sequence(array) => self.resolve_sequence(array, &key).await,
                Shape::Keyed(object) => self.resolve_keyed(object, &key).await,
            }
        }
        .boxed_local()
    }

    async fn resolve_sequence(&self, array: Array, key: &str) -> Result<Value> {
        let _guard = self.ancestors.enter(array.id(), key)?;
        let context = Value::Array(array.clone());
        let out = Array::new();
        for index in 0..array.len() {
            let child = self
                .resolve_node(context.clone(), index.to_string(), array.get(index))
                .await?;
            if child.is_unserializable() {
                out.push(Value::Null);
            } else {
                out.push(child);
            }
        }
        Ok(Value::Array(out))
    }

    async fn resolve_keyed(&self, object: Object, key: &str) -> Result<Value> {
        let _guard = self.ancestors.enter(object.id(), key)?;
        let context = Value::Object(object.clone());
        let out = Object::new();
        for name in object.own_enumerable_keys() {
            let current = object.get(&name);
            let child = self
                .resolve_node(context.clone(), name.clone(), current)
                .await?;
            if !child.is_unserializable() {
                out.set(name, child);
            }
        }
        Ok(Value::Object(out))
    }
}
