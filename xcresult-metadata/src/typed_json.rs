// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion from `xcresulttool` typed JSON to plain JSON.
//!
//! `xcresulttool get --format json` wraps every value in an envelope:
//!
//! * scalars are `{"_type": {"_name": "Int"}, "_value": "42"}`, with the value always encoded as a
//!   string;
//! * arrays are `{"_type": {"_name": "Array"}, "_values": [...]}`;
//! * objects carry a `_type` key alongside their fields.
//!
//! [`unwrap`] strips the envelopes and converts scalar strings to JSON numbers and booleans based
//! on the declared type name, so that the result can be deserialized with ordinary serde derives.

use serde_json::{Map, Number, Value};

const TYPE_KEY: &str = "_type";
const TYPE_NAME_KEY: &str = "_name";
const VALUE_KEY: &str = "_value";
const VALUES_KEY: &str = "_values";

/// Returns true if `value` looks like typed JSON, i.e. it is an object with a `_type` key.
pub fn is_typed(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key(TYPE_KEY))
}

/// Converts a typed JSON value into plain JSON.
///
/// Values that are not wrapped in an envelope are passed through unchanged, so calling this on
/// plain JSON is harmless.
pub fn unwrap(value: Value) -> Value {
    match value {
        Value::Object(map) => unwrap_object(map),
        Value::Array(items) => Value::Array(items.into_iter().map(unwrap).collect()),
        other => other,
    }
}

fn unwrap_object(mut map: Map<String, Value>) -> Value {
    let type_name = map
        .get(TYPE_KEY)
        .and_then(|ty| ty.get(TYPE_NAME_KEY))
        .and_then(Value::as_str)
        .map(str::to_owned);

    if let Some(values) = map.remove(VALUES_KEY) {
        return match values {
            Value::Array(items) => Value::Array(items.into_iter().map(unwrap).collect()),
            other => unwrap(other),
        };
    }

    if let Some(value) = map.remove(VALUE_KEY) {
        return unwrap_scalar(type_name.as_deref(), value);
    }

    map.remove(TYPE_KEY);
    Value::Object(
        map.into_iter()
            .map(|(key, value)| (key, unwrap(value)))
            .collect(),
    )
}

fn unwrap_scalar(type_name: Option<&str>, value: Value) -> Value {
    let Value::String(s) = value else {
        return unwrap(value);
    };

    let converted = match type_name {
        Some("Int" | "Int8" | "Int16" | "Int32" | "Int64") => s.parse::<i64>().ok().map(Value::from),
        Some("UInt8" | "UInt16" | "UInt32" | "UInt64") => s.parse::<u64>().ok().map(Value::from),
        Some("Double" | "Float") => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        Some("Bool") => match s.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    };

    converted.unwrap_or(Value::String(s))
}
