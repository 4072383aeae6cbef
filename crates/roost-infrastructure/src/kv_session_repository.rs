//! Session repository on top of a key-value store.
//!
//! The whole session is one JSON document under `SESSION_STORAGE_KEY`, written
//! in the versioned flat format (`{"version": "1.1.0", ...fields}`).

use crate::dto::create_session_migrator;
use async_trait::async_trait;
use roost_core::error::{Result, RoostError};
use roost_core::session::{SESSION_STORAGE_KEY, Session, SessionRepository};
use roost_core::storage::KeyValueStore;
use serde_json::Value;
use std::sync::Arc;

const ENTITY: &str = "session";

/// Schema version assumed for snapshots written by the mobile app's store,
/// which wraps the fields as `{"state": {...}, "version": 0}`.
const ENVELOPE_SCHEMA_VERSION: &str = "1.1.0";

pub struct KeyValueSessionRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, SESSION_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Serializes a session into the stored JSON document.
    pub fn encode(&self, session: &Session) -> Result<String> {
        Ok(create_session_migrator().save_domain_flat(ENTITY, session)?)
    }

    /// Parses a stored JSON document, migrating older versions.
    pub fn decode(&self, raw: &str) -> Result<Session> {
        let value: Value = serde_json::from_str(raw)?;
        let value = unwrap_store_envelope(value)?;
        let session: Session = create_session_migrator().load_flat_from(ENTITY, value)?;
        Ok(session)
    }
}

/// Turns `{"state": {...}, "version": <number>}` into a flat versioned object.
/// Anything else is returned untouched.
fn unwrap_store_envelope(value: Value) -> Result<Value> {
    let Value::Object(mut outer) = value else {
        return Err(RoostError::Serialization {
            format: "JSON".to_string(),
            message: "session snapshot is not an object".to_string(),
        });
    };

    let is_envelope = outer.get("version").is_some_and(Value::is_number)
        && outer.get("state").is_some_and(Value::is_object);
    if !is_envelope {
        return Ok(Value::Object(outer));
    }

    let Some(Value::Object(mut state)) = outer.remove("state") else {
        return Err(RoostError::internal("envelope state vanished"));
    };
    state.insert(
        "version".to_string(),
        Value::String(ENVELOPE_SCHEMA_VERSION.to_string()),
    );
    Ok(Value::Object(state))
}

#[async_trait]
impl SessionRepository for KeyValueSessionRepository {
    async fn load(&self) -> Result<Option<Session>> {
        match self.store.get(&self.key).await? {
            Some(raw) => self.decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let raw = self.encode(session)?;
        self.store.set(&self.key, raw).await?;
        tracing::debug!("[SessionRepository] Saved session snapshot under '{}'", self.key);
        Ok(())
    }
}
