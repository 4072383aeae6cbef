//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted `Session` record and the `User` it may hold
//! - `action`: `SessionAction`, the pure state transitions over a `Session`
//! - `repository`: `SessionRepository`, where snapshots are read from and written to
//!
//! # Usage
//!
//! ```ignore
//! use roost_core::session::{Session, SessionAction, User, UserPatch};
//!
//! let session = SessionAction::Login { user }.apply(Session::default());
//! assert!(session.is_authenticated);
//! ```

mod action;
mod model;
mod repository;

// Re-export public API
pub use action::SessionAction;
pub use model::{DEFAULT_USER_LOCATION, SESSION_STORAGE_KEY, Session, User, UserPatch};
pub use repository::SessionRepository;
