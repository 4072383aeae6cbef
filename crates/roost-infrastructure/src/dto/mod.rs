//! Versioned DTOs for persisted data.

mod session;

pub use session::{SessionDTO, SessionV1_0, SessionV1_1, UserDTO, create_session_migrator};
