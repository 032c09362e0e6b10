//! Entity models for notekeep.
//!
//! Wire representation is camelCase JSON (`createdAt`, `folderId`, ...),
//! matching what existing clients expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named grouping container for notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    /// Free-text label. No uniqueness or length constraint.
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Number of notes currently referencing this folder (computed at
    /// read time, never stored).
    #[serde(default)]
    pub note_count: i64,
}

/// A titled text record belonging to exactly one folder.
///
/// `folder_id` is immutable after creation and is never checked against
/// the folder store; a note may reference a folder that no longer (or
/// never) existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub folder_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update; equals `created_at` on a fresh note.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uuid_utils::new_v7;

    #[test]
    fn test_folder_serializes_camel_case() {
        let folder = Folder {
            id: new_v7(),
            name: "Work".to_string(),
            created_at: Utc::now(),
            note_count: 0,
        };
        let json = serde_json::to_value(&folder).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("noteCount").is_some());
        assert_eq!(json["name"], "Work");
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let now = Utc::now();
        let note = Note {
            id: new_v7(),
            title: "Plan".to_string(),
            content: "x".to_string(),
            folder_id: new_v7(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("folderId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_folder_note_count_defaults_on_deserialize() {
        let json = format!(
            r#"{{"id":"{}","name":"Inbox","createdAt":"2026-01-05T10:00:00Z"}}"#,
            Uuid::nil()
        );
        let folder: Folder = serde_json::from_str(&json).unwrap();
        assert_eq!(folder.note_count, 0);
    }
}
