pub mod api_client;
pub mod config_service;
pub mod dto;
pub mod kv_session_repository;
pub mod paths;
pub mod storage;

pub use crate::api_client::ApiClient;
pub use crate::config_service::ConfigService;
pub use crate::kv_session_repository::KeyValueSessionRepository;
pub use crate::paths::RoostPaths;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
