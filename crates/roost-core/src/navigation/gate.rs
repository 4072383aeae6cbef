use serde::{Deserialize, Serialize};

use super::route::{AuthenticatedScreen, Destination};
use crate::session::Session;

/// Whether the session has been read back from storage yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationStatus {
    Hydrating,
    Ready,
}

/// Outcome of the entry gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "destination", rename_all = "snake_case")]
pub enum GateDecision {
    /// Rehydration still in flight; show a splash and decide later.
    Loading,
    Route(Destination),
}

/// Outcome of the authenticated-section gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum SectionDecision {
    Render(AuthenticatedScreen),
    Redirect(Destination),
}

/// Entry gate. Onboarding always wins over authentication.
pub fn entry_destination(session: &Session) -> Destination {
    if !session.has_seen_onboarding {
        Destination::Onboarding
    } else if session.is_authenticated {
        Destination::Home
    } else {
        Destination::Login
    }
}

/// Entry gate that defers while the session is still being rehydrated.
pub fn evaluate_entry(status: HydrationStatus, session: &Session) -> GateDecision {
    match status {
        HydrationStatus::Hydrating => GateDecision::Loading,
        HydrationStatus::Ready => GateDecision::Route(entry_destination(session)),
    }
}

/// Guards every screen of the authenticated section.
pub fn guard_section(session: &Session, screen: AuthenticatedScreen) -> SectionDecision {
    if session.is_authenticated {
        SectionDecision::Render(screen)
    } else {
        SectionDecision::Redirect(Destination::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::User;
    use strum::IntoEnumIterator;

    fn session(has_seen_onboarding: bool, is_authenticated: bool) -> Session {
        Session {
            has_seen_onboarding,
            is_authenticated,
            user: is_authenticated.then(|| User::new("1", "X", "555")),
            ..Session::default()
        }
    }

    #[test]
    fn test_onboarding_precedes_authentication() {
        assert_eq!(entry_destination(&session(false, true)), Destination::Onboarding);
        assert_eq!(entry_destination(&session(false, false)), Destination::Onboarding);
    }

    #[test]
    fn test_authenticated_user_goes_home() {
        assert_eq!(entry_destination(&session(true, true)), Destination::Home);
    }

    #[test]
    fn test_unauthenticated_user_goes_to_login() {
        assert_eq!(entry_destination(&session(true, false)), Destination::Login);
    }

    #[test]
    fn test_loading_while_hydrating() {
        let decision = evaluate_entry(HydrationStatus::Hydrating, &session(true, true));
        assert_eq!(decision, GateDecision::Loading);

        let decision = evaluate_entry(HydrationStatus::Ready, &session(true, true));
        assert_eq!(decision, GateDecision::Route(Destination::Home));
    }

    #[test]
    fn test_section_redirects_when_logged_out() {
        let logged_out = session(true, false);
        for screen in AuthenticatedScreen::iter() {
            assert_eq!(
                guard_section(&logged_out, screen),
                SectionDecision::Redirect(Destination::Login)
            );
        }
    }

    #[test]
    fn test_section_renders_when_logged_in() {
        let logged_in = session(true, true);
        assert_eq!(
            guard_section(&logged_in, AuthenticatedScreen::Bookings),
            SectionDecision::Render(AuthenticatedScreen::Bookings)
        );
    }
}
