//! Navigation gate.
//!
//! Maps session state to one of the three top-level app sections, and guards
//! the screens that require a logged-in user. Everything here is a plain
//! function over `Session` so it can be exercised without any UI.

mod gate;
mod route;

pub use gate::{
    GateDecision, HydrationStatus, SectionDecision, entry_destination, evaluate_entry,
    guard_section,
};
pub use route::{AuthenticatedScreen, Destination};
