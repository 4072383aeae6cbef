//! Session DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, MigratesTo, Versioned};

use roost_core::session::{DEFAULT_USER_LOCATION, Session, User};

/// Persisted user record. Shared by every session version so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Session snapshot V1.0.0 (initial version).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionV1_0 {
    #[serde(default)]
    pub has_seen_onboarding: bool,

    #[serde(default)]
    pub is_authenticated: bool,

    #[serde(default)]
    pub user: Option<UserDTO>,

    #[serde(default = "default_location")]
    pub user_location: String,
}

/// Session snapshot V1.1.0.
///
/// Added has_selected_location to tell a chosen location from the default one.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionV1_1 {
    #[serde(default)]
    pub has_seen_onboarding: bool,

    #[serde(default)]
    pub is_authenticated: bool,

    #[serde(default)]
    pub user: Option<UserDTO>,

    #[serde(default = "default_location")]
    pub user_location: String,

    #[serde(default)]
    pub has_selected_location: bool,
}

/// Type alias for the latest Session version.
pub type SessionDTO = SessionV1_1;

fn default_location() -> String {
    DEFAULT_USER_LOCATION.to_string()
}

impl Default for SessionV1_0 {
    fn default() -> Self {
        Self {
            has_seen_onboarding: false,
            is_authenticated: false,
            user: None,
            user_location: default_location(),
        }
    }
}

impl Default for SessionV1_1 {
    fn default() -> Self {
        Self {
            has_seen_onboarding: false,
            is_authenticated: false,
            user: None,
            user_location: default_location(),
            has_selected_location: false,
        }
    }
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from SessionV1_0 to SessionV1_1.
/// A non-default location could only have come from the location picker.
impl MigratesTo<SessionV1_1> for SessionV1_0 {
    fn migrate(self) -> SessionV1_1 {
        let has_selected_location = self.user_location != DEFAULT_USER_LOCATION;
        SessionV1_1 {
            has_seen_onboarding: self.has_seen_onboarding,
            is_authenticated: self.is_authenticated,
            user: self.user,
            user_location: self.user_location,
            has_selected_location,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<UserDTO> for User {
    fn from(dto: UserDTO) -> Self {
        User {
            id: dto.id,
            name: dto.name,
            phone_number: dto.phone_number,
            email: dto.email,
        }
    }
}

impl From<User> for UserDTO {
    fn from(user: User) -> Self {
        UserDTO {
            id: user.id,
            name: user.name,
            phone_number: user.phone_number,
            email: user.email,
        }
    }
}

/// Convert SessionV1_1 DTO to domain model.
impl IntoDomain<Session> for SessionV1_1 {
    fn into_domain(self) -> Session {
        Session {
            has_seen_onboarding: self.has_seen_onboarding,
            is_authenticated: self.is_authenticated,
            user: self.user.map(Into::into),
            user_location: self.user_location,
            has_selected_location: self.has_selected_location,
        }
    }
}

/// Convert domain model to SessionV1_1 DTO for persistence.
impl version_migrate::FromDomain<Session> for SessionV1_1 {
    fn from_domain(session: Session) -> Self {
        SessionV1_1 {
            has_seen_onboarding: session.has_seen_onboarding,
            is_authenticated: session.is_authenticated,
            user: session.user.map(Into::into),
            user_location: session.user_location,
            has_selected_location: session.has_selected_location,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for Session snapshots.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Adds `hasSelectedLocation`, true when the location is not the default
/// - V1.1 → Session: Converts DTO to domain model
///
/// # Example
///
/// ```ignore
/// let migrator = create_session_migrator();
/// let session: Session = migrator.load_flat_from("session", json_value)?;
/// let json: String = migrator.save_domain_flat("session", &session)?;
/// ```
pub fn create_session_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    // Register migration path: V1.0 -> V1.1 -> Session
    let session_path = version_migrate::Migrator::define("session")
        .from::<SessionV1_0>()
        .step::<SessionV1_1>()
        .into_with_save::<Session>();

    migrator
        .register(session_path)
        .expect("Failed to register session migration path");

    migrator
}
