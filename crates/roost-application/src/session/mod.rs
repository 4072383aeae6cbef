//! Session state container and its persistence subscriber.
//!
//! - `store`: `SessionStore`, the single owned handle screens mutate and read
//! - `persister`: `SessionPersister`, writes snapshots whenever the store changes

mod persister;
mod store;

pub use persister::{PersisterHandle, SessionPersister};
pub use store::{SessionStore, StoreState};
