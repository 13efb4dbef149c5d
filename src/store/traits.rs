//! State store trait and error types
//!
//! This module defines the interface for state backends and the errors
//! they report.

use crate::store::Properties;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or persisting state
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} already exists, but is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} already exists, but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Malformed state file at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for state backend implementations
///
/// A run loads the mapping once, mutates it in memory and persists it once
/// at the end. No locking is done; concurrent runs against the same backend
/// are not supported.
pub trait StateStore {
    /// Loads the full mapping
    fn load(&self) -> StoreResult<Properties>;

    /// Replaces the stored mapping with `properties`
    fn persist(&mut self, properties: &Properties) -> StoreResult<()>;
}

/// Volatile store for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    properties: Properties,
    persist_count: usize,
}

impl MemoryStore {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            persist_count: 0,
        }
    }

    /// Current contents
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Number of times `persist` has been called
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> StoreResult<Properties> {
        Ok(self.properties.clone())
    }

    fn persist(&mut self, properties: &Properties) -> StoreResult<()> {
        self.properties = properties.clone();
        self.persist_count += 1;
        Ok(())
    }
}
