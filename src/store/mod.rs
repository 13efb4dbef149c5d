//! Storage module for persisting check state
//!
//! This module handles the flat key-value state that survives between runs:
//! - Parsing and rendering the properties text format
//! - The file-backed store with directory and file creation
//! - An in-memory store with the same interface

mod file;
mod properties;
mod traits;

pub use file::FileStore;
pub use properties::Properties;
pub use traits::{MemoryStore, StateStore, StoreError, StoreResult};
