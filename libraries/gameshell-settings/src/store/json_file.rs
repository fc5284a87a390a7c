//! JSON file key-value store
//!
//! All keys live in one JSON object. The file is read lazily on first access
//! and rewritten in full on every write, through a sibling temp file and a
//! rename so a crash never leaves a truncated document behind.

use super::{bool_value, int_value, string_value};
use async_trait::async_trait;
use gameshell_core::{KeyValueStore, Result, ShellError};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Persistent store backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Option<Map<String, Value>>>,
}

impl JsonFileStore {
    /// Store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<Map<String, Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Settings file not found, starting empty");
                return Ok(Map::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(ShellError::storage(format!(
                "{} does not hold a JSON object (found {})",
                self.path.display(),
                type_name(&other)
            ))),
        }
    }

    async fn write_file(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_json::to_string_pretty(map)?;
        let temp = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp, contents).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.read_file().await?);
        }
        Ok(cache.as_ref().and_then(|map| map.get(key).cloned()))
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        let mut cache = self.cache.lock().await;
        let mut map = match cache.take() {
            Some(map) => map,
            None => self.read_file().await?,
        };
        map.insert(key.to_string(), value);

        // A failed write leaves the cache empty so the next access rereads the file
        let written = self.write_file(&map).await;
        if written.is_ok() {
            *cache = Some(map);
        }
        written
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
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
