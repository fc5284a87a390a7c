//! Key-value store implementations
//!
//! Both stores keep values as JSON, so a key written as one type and read as
//! another is reported as a storage error rather than coerced.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use gameshell_core::{Result, ShellError};
use serde_json::Value;

/// Extract a typed value, rejecting type mismatches
fn typed<T>(
    key: &str,
    value: Option<&Value>,
    expected: &str,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> Result<Option<T>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => extract(value).map(Some).ok_or_else(|| {
            ShellError::storage(format!("{key} holds {value}, expected {expected}"))
        }),
    }
}

fn bool_value(key: &str, value: Option<&Value>) -> Result<Option<bool>> {
    typed(key, value, "a boolean", Value::as_bool)
}

fn string_value(key: &str, value: Option<&Value>) -> Result<Option<String>> {
    typed(key, value, "a string", |v| v.as_str().map(str::to_string))
}

fn int_value(key: &str, value: Option<&Value>) -> Result<Option<i64>> {
    typed(key, value, "an integer", Value::as_i64)
}
