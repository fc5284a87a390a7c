//! In-memory key-value store

use super::{bool_value, int_value, string_value};
use async_trait::async_trait;
use gameshell_core::{KeyValueStore, Result, ShellError};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Volatile store for tests and ephemeral sessions
///
/// Optionally delays every call, or fails every call, to stand in for slow or
/// broken platform storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    delay: Duration,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `delay`
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Seed a value
    #[must_use]
    pub fn with_value(self, key: &str, value: impl Into<Value>) -> Self {
        self.values.lock().insert(key.to_string(), value.into());
        self
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw stored value
    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    async fn access(&self, key: &str) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(ShellError::storage(format!("memory store unavailable ({key})")));
        }
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<Value>> {
        self.access(key).await?;
        Ok(self.value(key))
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        self.access(key).await?;
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        bool_value(key, self.read(key).await?.as_ref())
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.write(key, Value::Bool(value)).await
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        string_value(key, self.read(key).await?.as_ref())
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.write(key, Value::from(value)).await
    }

    async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        int_value(key, self.read(key).await?.as_ref())
    }

    async fn set_int(&self, key: &str, value: i64) -> Result<()> {
        self.write(key, Value::from(value)).await
    }
}
