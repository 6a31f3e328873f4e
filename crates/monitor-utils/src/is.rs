//! Runtime type checks over host values.
//!
//! All checks are derived from [`kind_of`], which classifies a value by its
//! canonical runtime tag rather than by any user visible class name.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The closed set of runtime kinds the SDK distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Number,
    String,
    Boolean,
    Null,
    Undefined,
    Symbol,
    Function,
    Object,
    Array,
    Process,
    Window,
    Other,
}

impl Kind {
    /// Returns the kind matching a canonical runtime tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Number" => Kind::Number,
            "String" => Kind::String,
            "Boolean" => Kind::Boolean,
            "Null" => Kind::Null,
            "Undefined" => Kind::Undefined,
            "Symbol" => Kind::Symbol,
            "Function" => Kind::Function,
            "Object" => Kind::Object,
            "Array" => Kind::Array,
            "process" => Kind::Process,
            "window" => Kind::Window,
            _ => Kind::Other,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Boolean => "Boolean",
            Kind::Null => "Null",
            Kind::Undefined => "Undefined",
            Kind::Symbol => "Symbol",
            Kind::Function => "Function",
            Kind::Object => "Object",
            Kind::Array => "Array",
            Kind::Process => "process",
            Kind::Window => "window",
            Kind::Other => "Other",
        };
        write!(f, "{}", str)
    }
}

/// Classifies the value by its canonical runtime tag.
pub fn kind_of(value: &Value) -> Kind {
    Kind::from_tag(value.tag())
}

pub fn is_number(value: &Value) -> bool {
    kind_of(value) == Kind::Number
}

pub fn is_string(value: &Value) -> bool {
    kind_of(value) == Kind::String
}

pub fn is_boolean(value: &Value) -> bool {
    kind_of(value) == Kind::Boolean
}

pub fn is_null(value: &Value) -> bool {
    kind_of(value) == Kind::Null
}

pub fn is_undefined(value: &Value) -> bool {
    kind_of(value) == Kind::Undefined
}

pub fn is_symbol(value: &Value) -> bool {
    kind_of(value) == Kind::Symbol
}

pub fn is_function(value: &Value) -> bool {
    kind_of(value) == Kind::Function
}

pub fn is_object(value: &Value) -> bool {
    kind_of(value) == Kind::Object
}

pub fn is_array(value: &Value) -> bool {
    kind_of(value) == Kind::Array
}

pub fn is_process(value: &Value) -> bool {
    kind_of(value) == Kind::Process
}

pub fn is_window(value: &Value) -> bool {
    kind_of(value) == Kind::Window
}

/// Reports whether the value is an error thrown by the host runtime.
pub fn is_error(value: &Value) -> bool {
    matches!(value.tag(), "Error" | "Exception" | "DOMException")
}

/// Reports whether the value is null, undefined or a blank string.
pub fn is_empty(value: &Value) -> bool {
    match kind_of(value) {
        Kind::Null | Kind::Undefined => true,
        Kind::String => value.as_str().is_some_and(|s| s.trim().is_empty()),
        _ => false,
    }
}

/// Reports whether the value is a plain object without any properties.
pub fn is_empty_object(value: &Value) -> bool {
    kind_of(value) == Kind::Object && matches!(value, Value::Object(obj) if obj.is_empty())
}

/// Reports whether the value is a plain object with its own property `key`.
pub fn is_exist_property(value: &Value, key: &str) -> bool {
    kind_of(value) == Kind::Object && matches!(value, Value::Object(obj) if obj.contains_key(key))
}
