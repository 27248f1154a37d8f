// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod json_file;
pub mod logging;
pub mod storage;

pub use logging::{init_file_logging, read_logs, LOG_FILE_NAME};
pub use storage::{default_storage_dir, StorageLayout, StorageProfile};
