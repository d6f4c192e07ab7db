//! Request DTOs for the key-value API
//!
//! Defines the structure of incoming request bodies and query strings.

use serde::Deserialize;

use crate::error::{KvError, Result};

/// JSON body for `PUT /set`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    /// May be empty
    pub value: String,
}

impl SetRequest {
    /// Rejects an empty key before any I/O is attempted.
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.key)
    }
}

/// Query string for `GET /get?key=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

impl KeyQuery {
    /// Returns the key, or `InvalidInput` if it is missing or empty.
    pub fn into_key(self) -> Result<String> {
        let key = self
            .key
            .ok_or_else(|| KvError::InvalidInput("Missing 'key' parameter".to_string()))?;
        validate_key(&key)?;
        Ok(key)
    }
}

/// Query string for `POST /set?key=...&value=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetQuery {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl TryFrom<SetQuery> for SetRequest {
    type Error = KvError;

    fn try_from(query: SetQuery) -> Result<Self> {
        let key = KeyQuery { key: query.key }.into_key()?;
        let value = query
            .value
            .ok_or_else(|| KvError::InvalidInput("Missing 'value' parameter".to_string()))?;
        Ok(SetRequest { key, value })
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidInput("Key cannot be empty".to_string()));
    }
    Ok(())
}
