//! # notekeep-core
//!
//! Core types, traits, and abstractions for the notekeep backend.
//!
//! This crate provides the entity models, error taxonomy, and repository
//! trait definitions that the store and API crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{Folder, Note};
pub use traits::{
    CreateFolderRequest, CreateNoteRequest, FolderRepository, NoteRepository, UpdateNoteRequest,
};
pub use uuid_utils::{is_v7, new_v7};
