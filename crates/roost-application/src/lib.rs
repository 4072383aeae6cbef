pub mod bootstrap;
pub mod session;

pub use bootstrap::{ClientBootstrap, bootstrap, open_ephemeral, open_file_backed, rehydrate};
pub use session::{PersisterHandle, SessionPersister, SessionStore, StoreState};
