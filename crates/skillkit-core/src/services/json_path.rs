//! Dot-path access into JSON documents
//!
//! `get_path(value, "skill.namespace")` walks nested objects;
//! `set_path` creates intermediate objects as it goes.

use serde_json::{Map, Value};

pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Set a nested value, replacing non-object intermediates with objects
pub fn set_path(value: &mut Value, path: &str, new_value: Value) {
    let mut current = value;
    let segments: Vec<&str> = path.split('.').collect();

    for (i, segment) in segments.iter().enumerate() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let object = current.as_object_mut().unwrap();

        if i == segments.len() - 1 {
            object.insert(segment.to_string(), new_value);
            return;
        }

        current = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// Remove a nested key; absent paths are a no-op
pub fn unset_path(value: &mut Value, path: &str) {
    let Some((parent_path, key)) = path.rsplit_once('.') else {
        if let Some(object) = value.as_object_mut() {
            object.remove(path);
        }
        return;
    };

    let mut current = value;
    for segment in parent_path.split('.') {
        let Some(next) = current.as_object_mut().and_then(|o| o.get_mut(segment)) else {
            return;
        };
        current = next;
    }

    if let Some(object) = current.as_object_mut() {
        object.remove(key);
    }
}
