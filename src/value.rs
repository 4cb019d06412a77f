//! Dynamic value vocabulary backing props bags and value objects
//!
//! Domain state in this crate is carried as a [`Value`] tree: domain
//! primitives at the leaves, order-preserving [`Props`] maps and arrays in
//! between, and nested domain-model instances held by reference. Composite
//! variants are `Arc`-shared, so cloning a tree is cheap and the original is
//! structurally shared rather than copied — the immutable-props discipline
//! falls out of ownership: a value stored inside a domain object is only ever
//! exposed by shared reference.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::domain_object::DomainObject;

/// Ordered field-name-to-value mapping backing entities and structured value objects
pub type Props = IndexMap<String, Value>;

/// A dynamically typed domain value
///
/// The variants mirror the value kinds the conversion machinery must
/// distinguish: domain primitives (string, number, boolean, null, date),
/// structured values (arrays, objects), non-serializable primitives
/// (undefined, bigint, symbol), opaque collections (map, set) and nested
/// domain-model instances.
#[derive(Clone)]
pub enum Value {
    /// Absent value; never a valid domain primitive
    Undefined,
    /// JSON null
    Null,
    /// Boolean primitive
    Bool(bool),
    /// Numeric primitive
    Number(f64),
    /// Arbitrary-precision integer; not JSON-serializable on the strict path
    BigInt(i128),
    /// String primitive
    String(String),
    /// Opaque token; not JSON-serializable on the strict path
    Symbol(String),
    /// Date primitive, serialized as an ISO-8601 string
    Date(DateTime<Utc>),
    /// Ordered sequence of values
    Array(Arc<Vec<Value>>),
    /// Ordered field mapping
    Object(Arc<Props>),
    /// Keyed collection; outside the serializable domain vocabulary
    Map(Arc<Vec<(Value, Value)>>),
    /// Unkeyed collection; outside the serializable domain vocabulary
    Set(Arc<Vec<Value>>),
    /// Nested domain-model instance, held by reference so identity survives
    /// snapshots and evolutions
    Domain(Arc<dyn DomainObject>),
}

impl Value {
    /// Wrap a sequence of values
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Arc::new(values))
    }

    /// Wrap a props mapping
    pub fn object(props: Props) -> Self {
        Value::Object(Arc::new(props))
    }

    /// Wrap map entries
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// Wrap set members
    pub fn set(members: Vec<Value>) -> Self {
        Value::Set(Arc::new(members))
    }

    /// Wrap a domain-model instance
    pub fn domain(object: impl DomainObject + 'static) -> Self {
        Value::Domain(Arc::new(object))
    }

    /// Name of the value kind, used in conversion error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "BigInt",
            Value::String(_) => "string",
            Value::Symbol(_) => "Symbol",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "Map",
            Value::Set(_) => "Set",
            Value::Domain(_) => "domain object",
        }
    }

    /// Borrow as a string primitive
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a numeric primitive
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow as a boolean primitive
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as a date primitive
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Borrow as a props mapping
    pub fn as_object(&self) -> Option<&Props> {
        match self {
            Value::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Borrow as a sequence
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Borrow as a nested domain-model instance
    pub fn as_domain(&self) -> Option<&Arc<dyn DomainObject>> {
        match self {
            Value::Domain(object) => Some(object),
            _ => None,
        }
    }
}

/// Check whether a value is a domain primitive
///
/// Domain primitives are the terminal leaf values of the model: string,
/// number, boolean, null and date. `Undefined` is explicitly not one.
pub fn is_domain_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null | Value::Date(_)
    )
}

/// Check whether a value is a plain old primitive
///
/// Broader than [`is_domain_primitive`]: additionally covers `Undefined`,
/// `BigInt` and `Symbol`, the kinds the readonly machinery passes through
/// untouched.
pub fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_)
            | Value::Number(_)
            | Value::Bool(_)
            | Value::Null
            | Value::Undefined
            | Value::BigInt(_)
            | Value::Symbol(_)
    )
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            // Same instance, or deep structural equality over the exposed value
            (Value::Domain(a), Value::Domain(b)) => {
                Arc::ptr_eq(a, b) || a.as_value() == b.as_value()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::BigInt(n) => write!(f, "BigInt({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Symbol(s) => write!(f, "Symbol({s:?})"),
            Value::Date(d) => write!(f, "Date({d})"),
            Value::Array(values) => f.debug_tuple("Array").field(values).finish(),
            Value::Object(props) => f.debug_tuple("Object").field(props).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Set(members) => f.debug_tuple("Set").field(members).finish(),
            Value::Domain(object) => f.debug_tuple("Domain").field(object).finish(),
        }
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
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::array(values)
    }
}

impl From<Props> for Value {
    fn from(props: Props) -> Self {
        Value::object(props)
    }
}

/// Build a [`Props`] mapping from `key => value` pairs
///
/// Values are converted through [`Value`]'s `From` impls:
///
/// ```rust
/// use domain_kernel::{props, Value};
///
/// let props = props! {
///     "name" => "Ada",
///     "age" => 36,
/// };
/// assert_eq!(props["name"], Value::from("Ada"));
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::Props::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $( props.insert(($key).to_string(), $crate::Value::from($value)); )+
        props
    }};
}
