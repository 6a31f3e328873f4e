use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::is::Kind;

/// The tag reported for host values posing as one of the core kinds.
pub const OTHER_TAG: &str = "Other";

/// An ordered property map, as found on plain host objects.
pub type Object = IndexMap<String, Value>;

/// Value is a host runtime value handed to the SDK from the application.
///
/// Every variant carries enough information to derive its canonical
/// runtime tag (see [`Value::tag`]), which is what the type checks in
/// [`crate::is`] branch on.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A symbol with its optional description.
    Symbol(Option<String>),
    Function {
        name: Option<String>,
    },
    Array(Vec<Value>),
    Object(Object),
    /// The global process object of a server-side runtime.
    Process,
    /// The global window object of a browser.
    Window,
    /// A boxed primitive (e.g. `new String("x")`). It reports the tag of
    /// the primitive it wraps.
    Boxed(Box<Value>),
    Error(ErrorValue),
    /// Any other built-in, identified only by its internal tag
    /// (e.g. "Date", "RegExp", "DOMException"). A tag naming one of the
    /// core kinds is reported as [`OTHER_TAG`] instead.
    Host {
        tag: String,
    },
}

/// An error object as thrown by the host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,

    /// The raw, engine formatted stack text (if available).
    pub stack: Option<String>,
}

impl Value {
    /// Returns the canonical runtime tag of the value.
    ///
    /// This is the structural tag of the value, independent of any user
    /// defined class name, so boxed and unboxed primitives classify alike.
    pub fn tag(&self) -> &str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Function { .. } => "Function",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Process => "process",
            Value::Window => "window",
            Value::Boxed(inner) => inner.tag(),
            Value::Error(_) => "Error",
            Value::Host { tag } if Kind::from_tag(tag) == Kind::Other => tag.as_str(),
            Value::Host { .. } => OTHER_TAG,
        }
    }

    /// Returns the string contents of a string value, unwrapping boxed strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Boxed(inner) => inner.as_str(),
            _ => None,
        }
    }

    /// Converts the value into JSON the way the host serializer does.
    ///
    /// Returns `None` for values without a JSON representation
    /// (undefined, functions and symbols).
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        Some(match self {
            Value::Undefined | Value::Function { .. } | Value::Symbol(_) => return None,
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|v| v.to_json().unwrap_or(Json::Null))
                    .collect(),
            ),
            Value::Object(obj) => Json::Object(
                obj.iter()
                    .filter_map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                    .collect(),
            ),
            Value::Boxed(inner) => return inner.to_json(),
            Value::Process | Value::Window | Value::Error(_) | Value::Host { .. } => {
                Json::Object(serde_json::Map::new())
            }
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Undefined)
    }
}
