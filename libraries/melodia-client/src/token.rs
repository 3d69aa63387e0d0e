//! Client-local bearer token storage.
//!
//! The token is the only thing the client persists. It lives under the
//! fixed key [`TOKEN_KEY`], so a file written by one run is read back by
//! the next.

use crate::error::{ClientError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "token";

/// Storage for the bearer token.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    ///
    /// Unreadable storage reads as "no token" (anonymous).
    fn load(&self) -> Option<String>;

    /// Persist a token, replacing any previous one.
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token.
    fn clear(&self) -> Result<()>;
}

/// In-process token storage (lost on exit)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file storage: `{ "token": "<bearer>" }`
///
/// Other keys in the file are preserved on save and clear.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => Err(ClientError::TokenStore(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| ClientError::TokenStore(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match self.read_map() {
            Ok(map) => map
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable token file");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_map(&map)?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(_) => Map::new(),
        };
        if map.remove(TOKEN_KEY).is_some() || self.path.exists() {
            self.write_map(&map)?;
        }
        debug!(path = %self.path.display(), "Token cleared");
        Ok(())
    }
}
