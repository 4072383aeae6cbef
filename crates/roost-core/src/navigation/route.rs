use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Top-level sections the app can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Destination {
    Onboarding,
    Login,
    /// Landing screen of the authenticated section.
    Home,
}

impl Destination {
    /// Opaque route identifier handed to the router.
    pub fn route(&self) -> &'static str {
        match self {
            Destination::Onboarding => "/onboarding",
            Destination::Login => "/login",
            Destination::Home => "/home",
        }
    }
}

/// Screens that live under the authenticated section.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AuthenticatedScreen {
    Home,
    Search,
    Bookings,
    Favourites,
    Profile,
    Notifications,
    HostelDetail,
    TiffinDetail,
    Help,
}

impl AuthenticatedScreen {
    pub fn route(&self) -> String {
        format!("/app/{}", self.as_ref())
    }
}
