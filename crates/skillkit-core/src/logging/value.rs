//! Loggable values
//!
//! A closed union of everything the logger accepts, with one explicit
//! formatting rule per variant instead of duck-typed string conversion.

use std::collections::BTreeMap;
use std::fmt;

/// A value that can be passed to [`Logger::info`](super::Logger::info) and
/// friends.
///
/// # Example
///
/// ```
/// use skillkit_core::logging::LogValue;
///
/// assert_eq!(LogValue::from("taco").to_string(), "taco");
/// assert_eq!(LogValue::from(5.0).to_string(), "5");
/// assert_eq!(LogValue::Null.to_string(), "undefined");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Str(String),
    Num(f64),
    Bool(bool),
    /// An absent value; renders as the literal `undefined`
    Null,
    /// An error, captured by its display form
    Error(String),
    Seq(Vec<LogValue>),
    Map(BTreeMap<String, LogValue>),
}

impl LogValue {
    /// Capture any error by its display form
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        LogValue::Error(err.to_string())
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Str(s) => f.write_str(s),
            LogValue::Num(n) => write!(f, "{}", n),
            LogValue::Bool(b) => write!(f, "{}", b),
            LogValue::Null => f.write_str("undefined"),
            LogValue::Error(e) => f.write_str(e),
            LogValue::Seq(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&rendered.join(","))
            }
            LogValue::Map(entries) => f.write_str(&render_map(entries)),
        }
    }
}

fn render_map(entries: &BTreeMap<String, LogValue>) -> String {
    let mut object = serde_json::Map::new();
    for (key, value) in entries {
        object.insert(key.clone(), to_json(value));
    }
    serde_json::Value::Object(object).to_string()
}

fn to_json(value: &LogValue) -> serde_json::Value {
    match value {
        LogValue::Str(s) => serde_json::Value::String(s.clone()),
        LogValue::Num(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        LogValue::Bool(b) => serde_json::Value::Bool(*b),
        LogValue::Null => serde_json::Value::Null,
        LogValue::Error(e) => serde_json::Value::String(e.clone()),
        LogValue::Seq(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        LogValue::Map(entries) => {
            let mut object = serde_json::Map::new();
            for (key, value) in entries {
                object.insert(key.clone(), to_json(value));
            }
            serde_json::Value::Object(object)
        }
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        LogValue::Str(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        LogValue::Str(value)
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        LogValue::Str(value.clone())
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        LogValue::Num(value)
    }
}

impl From<i32> for LogValue {
    fn from(value: i32) -> Self {
        LogValue::Num(value as f64)
    }
}

impl From<i64> for LogValue {
    fn from(value: i64) -> Self {
        LogValue::Num(value as f64)
    }
}

impl From<u32> for LogValue {
    fn from(value: u32) -> Self {
        LogValue::Num(value as f64)
    }
}

impl From<usize> for LogValue {
    fn from(value: usize) -> Self {
        LogValue::Num(value as f64)
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        LogValue::Bool(value)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => LogValue::Null,
        }
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(items: Vec<T>) -> Self {
        LogValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, LogValue>> for LogValue {
    fn from(entries: BTreeMap<String, LogValue>) -> Self {
        LogValue::Map(entries)
    }
}
