//! Template Store
//!
//! Provides persistence of enrolled templates with repository pattern.

mod repository;

pub use repository::{TemplateRecord, TemplateStore};

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Repository lock error: {0}")]
    Lock(String),
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot encoding error: {0}")]
    Codec(#[from] postcard::Error),
}
