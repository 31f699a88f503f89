pub mod config_service;
pub mod history_repository;
pub mod paths;
pub mod preference_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::history_repository::KvReportHistoryRepository;
pub use crate::paths::DataHelpPaths;
pub use crate::preference_repository::KvPreferenceRepository;
pub use crate::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RecordUpdate};
