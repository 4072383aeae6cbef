use serde::{Deserialize, Serialize};

use super::model::{Session, User, UserPatch};

/// A state transition over a `Session`.
///
/// `apply` is pure: no I/O, no clocks. The session store runs it inside a single
/// watch-channel update so subscribers only ever see the whole result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionAction {
    SetHasSeenOnboarding { value: bool },
    SetUserLocation { location: String },
    SetHasSelectedLocation { value: bool },
    /// Replaces the user wholesale and marks the session authenticated.
    Login { user: User },
    /// Clears the user. Onboarding and location fields are kept.
    Logout,
    /// Shallow-merges into the current user; no-op when logged out.
    UpdateUser { patch: UserPatch },
}

impl SessionAction {
    pub fn apply(self, mut session: Session) -> Session {
        match self {
            SessionAction::SetHasSeenOnboarding { value } => {
                session.has_seen_onboarding = value;
            }
            SessionAction::SetUserLocation { location } => {
                session.user_location = location;
            }
            SessionAction::SetHasSelectedLocation { value } => {
                session.has_selected_location = value;
            }
            SessionAction::Login { user } => {
                session.user = Some(user);
                session.is_authenticated = true;
            }
            SessionAction::Logout => {
                session.user = None;
                session.is_authenticated = false;
            }
            SessionAction::UpdateUser { patch } => {
                if let Some(user) = session.user.as_mut() {
                    user.merge(patch);
                }
            }
        }
        session
    }

    /// Short name used in log lines. Never includes user data.
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::SetHasSeenOnboarding { .. } => "set_has_seen_onboarding",
            SessionAction::SetUserLocation { .. } => "set_user_location",
            SessionAction::SetHasSelectedLocation { .. } => "set_has_selected_location",
            SessionAction::Login { .. } => "login",
            SessionAction::Logout => "logout",
            SessionAction::UpdateUser { .. } => "update_user",
        }
    }
}
