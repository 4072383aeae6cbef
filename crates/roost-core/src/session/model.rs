//! Session domain models.
//!
//! Contains the device-local session record that survives restarts: onboarding,
//! authentication and location state.

use serde::{Deserialize, Serialize};

/// Location label used until the user picks one.
pub const DEFAULT_USER_LOCATION: &str = "Nagpur, Maharashtra";

/// Key under which the session snapshot is written to the key-value store.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

/// An authenticated user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone_number: phone_number.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Shallow merge: every field present in `patch` overwrites ours.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
    }
}

/// A partial `User` used by profile edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
    }
}

/// Session state persisted on the device.
///
/// There is exactly one of these per process, owned by the session store.
/// `is_authenticated` mirrors `user.is_some()`; every `SessionAction` keeps the two
/// in step, and `normalized` repairs snapshots read from storage that do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Set once the user completes or dismisses onboarding. Never reset.
    pub has_seen_onboarding: bool,

    pub is_authenticated: bool,

    pub user: Option<User>,

    /// Free-text location label.
    pub user_location: String,

    /// Whether `user_location` was explicitly chosen rather than the default.
    pub has_selected_location: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            has_seen_onboarding: false,
            is_authenticated: false,
            user: None,
            user_location: DEFAULT_USER_LOCATION.to_string(),
            has_selected_location: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `is_authenticated` agrees with the presence of a user.
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == self.user.is_some()
    }

    /// Derives `is_authenticated` from `user`.
    pub fn normalized(mut self) -> Self {
        self.is_authenticated = self.user.is_some();
        self
    }
}
