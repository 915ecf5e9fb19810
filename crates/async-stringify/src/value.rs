//! Value graph accepted by the engine and the renderer.
//!
//! Containers are shared handles: cloning an [`Object`] or [`Array`] clones the
//! handle, not the contents, so a graph can hold the same container twice or
//! refer back to one of its own ancestors.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use indexmap::map::Entry;

/// Zero-argument conversion a container exposes to produce its own
/// representable form. Receives only its receiver.
pub type SerializationHook = Rc<dyn Fn(&Object) -> Value>;

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Arbitrary-precision integer; has no JSON mapping.
    BigInt(i128),
    Symbol(Symbol),
    Function(Function),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    /// Values an object member drops and an array slot turns into `null`.
    pub fn is_unserializable(&self) -> bool {
        matches!(self, Value::Undefined | Value::Function(_) | Value::Symbol(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Identity comparison for containers, functions and symbols; value
    /// comparison for everything else.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::BigInt(_) => "BigInt",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// Identity of a shared container, stable while the container is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ContainerId(usize);

/// Unique opaque primitive. Two symbols are equal only if they are the same
/// symbol, whatever their descriptions.
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(description: &str) -> Self {
        Symbol(Rc::from(description))
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).cast::<u8>().hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Opaque, non-serializable function reference.
#[derive(Clone)]
pub struct Function(Rc<str>);

impl Function {
    pub fn new(name: &str) -> Self {
        Function(Rc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(s: Symbol) -> Self {
        PropertyKey::Symbol(s)
    }
}

#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

#[derive(Default)]
struct ObjectData {
    properties: IndexMap<PropertyKey, Property>,
    prototype: Option<Object>,
    hook: Option<SerializationHook>,
}

/// Insertion-ordered keyed container with an optional prototype.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object inheriting from `prototype`.
    pub fn with_prototype(prototype: &Object) -> Self {
        let object = Self::new();
        object.0.borrow_mut().prototype = Some(prototype.clone());
        object
    }

    pub fn prototype(&self) -> Option<Object> {
        self.0.borrow().prototype.clone()
    }

    /// Assigns an own property. An existing property keeps its position and
    /// enumerability; a new one is appended as enumerable.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.borrow_mut().properties.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().value = value,
            Entry::Vacant(slot) => {
                slot.insert(Property {
                    value,
                    enumerable: true,
                });
            }
        }
    }

    /// Defines an own property with explicit enumerability, replacing any
    /// previous definition in place.
    pub fn define(&self, key: impl Into<PropertyKey>, value: impl Into<Value>, enumerable: bool) {
        let key = key.into();
        let property = Property {
            value: value.into(),
            enumerable,
        };
        // insert keeps the position of an existing key
        self.0.borrow_mut().properties.insert(key, property);
    }

    /// Looks `key` up on the object, then along its prototype chain.
    pub fn get(&self, key: &str) -> Value {
        let key = PropertyKey::from(key);
        let mut current = Some(self.clone());
        while let Some(object) = current {
            let data = object.0.borrow();
            if let Some(prop) = data.properties.get(&key) {
                return prop.value.clone();
            }
            current = data.prototype.clone();
        }
        Value::Undefined
    }

    pub fn get_own(&self, key: &PropertyKey) -> Option<Property> {
        self.0.borrow().properties.get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let key = PropertyKey::from(key);
        self.0
            .borrow_mut()
            .properties
            .shift_remove(&key)
            .map(|prop| prop.value)
    }

    /// Number of own properties, enumerable or not.
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Own enumerable string keys in insertion order. Symbol-keyed and
    /// inherited properties are not included.
    pub fn own_enumerable_keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter_map(|(key, prop)| match key {
                PropertyKey::String(s) if prop.enumerable => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn set_hook<F>(&self, hook: F)
    where
        F: Fn(&Object) -> Value + 'static,
    {
        self.0.borrow_mut().hook = Some(Rc::new(hook));
    }

    /// The serialization hook of this object or the nearest prototype that
    /// has one.
    pub fn hook(&self) -> Option<SerializationHook> {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            let data = object.0.borrow();
            if let Some(hook) = &data.hook {
                return Some(Rc::clone(hook));
            }
            current = data.prototype.clone();
        }
        None
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0) as *const () as usize)
    }
}

impl fmt::Debug for Object {
    // Keys only: contents may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("keys", &self.own_enumerable_keys())
            .finish()
    }
}

impl<K: Into<PropertyKey>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object = Object::new();
        for (k, v) in iter {
            object.set(k, v);
        }
        object
    }
}

/// Index-ordered sequence. Slots never written are holes.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Option<Value>>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    /// An array of `len` holes.
    pub fn with_len(len: usize) -> Self {
        Array(Rc::new(RefCell::new(vec![None; len])))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(Some(value.into()));
    }

    /// Writes slot `index`, growing the array with holes if needed.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut slots = self.0.borrow_mut();
        if index >= slots.len() {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(value.into());
    }

    /// The value at `index`; holes and out-of-range reads give `Undefined`.
    pub fn get(&self, index: usize) -> Value {
        self.0
            .borrow()
            .get(index)
            .cloned()
            .flatten()
            .unwrap_or_default()
    }

    pub fn is_hole(&self, index: usize) -> bool {
        matches!(self.0.borrow().get(index), Some(None))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0) as *const () as usize)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array").field("len", &self.len()).finish()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let slots = iter.into_iter().map(|v| Some(v.into())).collect();
        Array(Rc::new(RefCell::new(slots)))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(map.into_iter().collect()),
        }
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    /// A date-like object serializing itself as ISO-8601 UTC text with
    /// millisecond precision.
    fn from(at: chrono::DateTime<chrono::Utc>) -> Self {
        let object = Object::new();
        object.set_hook(move |_| {
            Value::String(at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        });
        Value::Object(object)
    }
}
