//! Runtime values for the template interpreter.
//!
//! `Value` is a closed tagged union over scalars, owned aggregates and two
//! lazy variants (`GenericList`, `GenericMap`) that hold an accessor instead
//! of data. Every cross-cutting operation (truthiness, subscript, iteration
//! adaptation, equality, display) is an exhaustive match over the variants.
//!
//! Heap payloads go through `Heap<T>`, whose constructor is private to this
//! module:
//!
//! ```text
//! let s = Value::string("hello");               // OK
//! let list = Value::list(vec![Value::int(1)]);  // OK
//! let s = Value::Str(Heap::new(...));           // ERROR: Heap::new is pub(super)
//! ```

mod heap;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::accessor::{
    EmptyListAccessor, GenericList, GenericMap, ListItemAccessor, MapItemAccessor,
    ValuesListAdaptor,
};
use crate::errors::{type_mismatch, EvalError, EvalResult};

pub use heap::Heap;

/// Owned ordered sequence of values.
pub type ValuesList = Vec<Value>;

/// Owned mapping from string key to value.
pub type ValuesMap = FxHashMap<String, Value>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// No value. Missing variables and absent keys evaluate to this.
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    /// Owned list.
    List(Heap<ValuesList>),
    /// Owned map.
    Map(Heap<ValuesMap>),
    /// Lazily adapted list-like data behind a [`ListItemAccessor`].
    GenericList(GenericList),
    /// Lazily adapted map-like data behind a [`MapItemAccessor`].
    GenericMap(GenericMap),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: ValuesList) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: ValuesMap) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Build an owned map from `(key, value)` pairs.
    ///
    /// ```text
    /// let image = Value::map_from([("i", Value::int(1)), ("name", Value::string("a"))]);
    /// ```
    pub fn map_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap a list accessor as a lazy list value.
    #[inline]
    pub fn generic_list(accessor: impl ListItemAccessor + 'static) -> Self {
        Value::GenericList(GenericList::new(accessor))
    }

    /// Wrap a map accessor as a lazy map value.
    #[inline]
    pub fn generic_map(accessor: impl MapItemAccessor + 'static) -> Self {
        Value::GenericMap(GenericMap::new(accessor))
    }
}

// Value Methods

impl Value {
    /// Map-shaped: owned map or generic map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_) | Value::GenericMap(_))
    }

    /// List-shaped: owned list or generic list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_) | Value::GenericList(_))
    }

    /// Strict coercion to an owned map.
    ///
    /// Unlike [`subscript`](Self::subscript) this does not tolerate other
    /// variants: anything but `Map` is a type mismatch.
    pub fn as_map(&self) -> Result<&ValuesMap, EvalError> {
        match self {
            Value::Map(map) => Ok(map),
            _ => Err(type_mismatch("map", self.type_name())),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers beyond 2^53 round to the nearest float.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers beyond 2^53 have no exact float"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow an owned list. Generic lists are not materialized.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Keyed access on a map-shaped value.
    ///
    /// - owned map: the entry, or `Empty` when the key is absent;
    /// - generic map: delegates to the accessor, so an unknown field is an
    ///   invalid-field error;
    /// - any other variant: `Empty`.
    pub fn subscript(&self, name: &str) -> EvalResult {
        match self {
            Value::Map(map) => Ok(map.get(name).cloned().unwrap_or(Value::Empty)),
            Value::GenericMap(map) => map.accessor().value_by_name(name),
            Value::Empty
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Str(_)
            | Value::List(_)
            | Value::GenericList(_) => Ok(Value::Empty),
        }
    }

    /// Adapt this value for iteration.
    ///
    /// Owned lists get an adaptor sharing their storage, generic lists hand
    /// out their own accessor, everything else iterates zero times.
    pub fn list_accessor(&self) -> Arc<dyn ListItemAccessor> {
        match self {
            Value::List(items) => Arc::new(ValuesListAdaptor::new(items.clone())),
            Value::GenericList(list) => list.shared(),
            Value::Empty
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Str(_)
            | Value::Map(_)
            | Value::GenericMap(_) => Arc::new(EmptyListAccessor),
        }
    }

    /// Truthiness: booleans pass through, numbers are true when nonzero,
    /// strings and aggregates when nonempty, `Empty` is false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Empty => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::GenericList(list) => list.accessor().size() != 0,
            Value::GenericMap(map) => map.accessor().size() != 0,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::GenericList(_) => "generic list",
            Value::GenericMap(_) => "generic map",
        }
    }

    /// Keys of a map-shaped value, sorted. Empty for everything else.
    pub fn map_keys(&self) -> Vec<String> {
        match self {
            Value::Map(map) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort_unstable();
                keys
            }
            Value::GenericMap(map) => {
                let mut keys = map.accessor().keys();
                keys.sort_unstable();
                keys
            }
            _ => Vec::new(),
        }
    }

    /// Structural equality.
    ///
    /// Lists compare element-wise and maps key-wise regardless of whether
    /// they are owned or lazily adapted, so a reflected `Vec<i64>` equals the
    /// owned list holding the same integers.
    #[allow(clippy::float_cmp, reason = "floats compare by IEEE equality")]
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (a, b) if a.is_list() && b.is_list() => {
                lists_equal(a.list_accessor().as_ref(), b.list_accessor().as_ref())
            }
            (a, b) if a.is_map() && b.is_map() => maps_equal(a, b),
            _ => false,
        }
    }
}

fn lists_equal(a: &dyn ListItemAccessor, b: &dyn ListItemAccessor) -> bool {
    let len = a.size();
    len == b.size() && (0..len).all(|i| a.value_by_index(i).equals(&b.value_by_index(i)))
}

fn maps_equal(a: &Value, b: &Value) -> bool {
    let keys = a.map_keys();
    if keys != b.map_keys() {
        return false;
    }
    keys.iter().all(|key| match (a.subscript(key), b.subscript(key)) {
        (Ok(x), Ok(y)) => x.equals(&y),
        _ => false,
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "Empty"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(map) => write!(f, "Map({:?})", &**map),
            Value::GenericList(list) => write!(f, "{list:?}"),
            Value::GenericMap(map) => write!(f, "{map:?}"),
        }
    }
}

/// Rendered form of a value, as written to the output by `{{ expr }}`.
///
/// `Empty` renders as nothing; maps render sorted by key.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::List(_) | Value::GenericList(_) => {
                let items = self.list_accessor();
                write!(f, "[")?;
                for i in 0..items.size() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", items.value_by_index(i))?;
                }
                write!(f, "]")
            }
            Value::Map(_) | Value::GenericMap(_) => {
                write!(f, "{{")?;
                for (i, key) in self.map_keys().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    let value = self.subscript(key).unwrap_or(Value::Empty);
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<ValuesList> for Value {
    fn from(items: ValuesList) -> Self {
        Value::list(items)
    }
}

impl From<ValuesMap> for Value {
    fn from(entries: ValuesMap) -> Self {
        Value::map(entries)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::list(iter.into_iter().collect())
    }
}
