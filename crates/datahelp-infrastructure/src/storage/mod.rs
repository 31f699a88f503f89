//! File storage primitives.

mod atomic_toml;
mod file_lock;
mod key_value;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_lock::{FileLock, write_atomic};
pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RecordUpdate};
