//! Centralized default constants for the notekeep system.
//!
//! All crates reference these constants instead of defining their own
//! magic values.

// =============================================================================
// NOTES
// =============================================================================

/// Placeholder title applied when a note is created without one.
pub const NOTE_TITLE_PLACEHOLDER: &str = "Untitled";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address when HOST is not set.
pub const BIND_HOST: &str = "0.0.0.0";

/// Default listen port when PORT is not set.
pub const PORT: u16 = 3000;

/// Maximum accepted request body size in bytes (1 MB).
///
/// Note bodies are free text with no enforced length limit at the model
/// layer; this caps only what the HTTP layer will buffer.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;
