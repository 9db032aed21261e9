pub mod kv;
pub mod settings;
pub mod tasks;

use std::path::PathBuf;

use thiserror::Error;

pub use kv::{FileStore, KvStore, MemStore};
pub use tasks::TaskStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create store directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
