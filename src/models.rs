//! Domain records returned to agents.
//!
//! These are the normalized shapes built from the raw Data API responses:
//! millisecond timestamps become RFC 3339 datetimes, Joplin's 0/1 todo
//! flags become booleans, and an empty `parent_id` becomes `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{NoteData, NotebookData, ResourceData, TagData};

/// Character cap for search result snippets.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Lightweight tag reference embedded in note responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    /// Tag id.
    pub id: String,
    /// Tag title.
    pub title: String,
}

/// Full tag record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Tag id.
    pub id: String,
    /// Tag title.
    pub title: String,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Last update time.
    pub updated_time: DateTime<Utc>,
}

/// Full note with body and attached tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Note id.
    pub id: String,
    /// Note title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Owning notebook id.
    pub notebook_id: String,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Last update time.
    pub updated_time: DateTime<Utc>,
    /// Whether the note is a todo item.
    pub is_todo: bool,
    /// Whether the todo is completed. Only meaningful when `is_todo` is set.
    pub todo_completed: bool,
    /// Tags attached to the note.
    pub tags: Vec<TagRef>,
}

/// Note with a truncated body, used in search results. Fetch the note by id
/// for the full body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSnippet {
    /// Note id.
    pub id: String,
    /// Note title.
    pub title: String,
    /// Owning notebook id.
    pub notebook_id: String,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Last update time.
    pub updated_time: DateTime<Utc>,
    /// Whether the note is a todo item.
    pub is_todo: bool,
    /// Whether the todo is completed.
    pub todo_completed: bool,
    /// First [`SNIPPET_MAX_CHARS`] characters of the body.
    pub snippet: String,
}

/// Notebook record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Notebook id.
    pub id: String,
    /// Notebook title.
    pub title: String,
    /// Parent notebook id; `None` at the root.
    pub parent_id: Option<String>,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Last update time.
    pub updated_time: DateTime<Utc>,
}

/// Node in the reconstructed notebook hierarchy. Derived, rebuilt on every
/// request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookTreeNode {
    /// Notebook id.
    pub id: String,
    /// Notebook title.
    pub title: String,
    /// Child notebooks, ordered by case-insensitive title then id.
    #[serde(default)]
    pub children: Vec<NotebookTreeNode>,
}

/// Resource (attachment) metadata. Read-only; binary content is never
/// fetched through this server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Resource id.
    pub id: String,
    /// Resource title.
    pub title: String,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time.
    pub created_time: DateTime<Utc>,
    /// Last update time.
    pub updated_time: DateTime<Utc>,
}

/// Convert Joplin's millisecond timestamps. Zero means the field was not
/// populated; fall back to now like the reference behavior.
fn datetime_from_millis(ms: i64) -> DateTime<Utc> {
    if ms <= 0 {
        return Utc::now();
    }
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

fn parent_or_none(parent_id: String) -> Option<String> {
    if parent_id.is_empty() {
        None
    } else {
        Some(parent_id)
    }
}

impl Note {
    /// Build a full note from raw data plus its attached tags.
    pub fn from_data(data: NoteData, tags: Vec<TagRef>) -> Self {
        Self {
            id: data.id,
            title: data.title,
            body: data.body,
            notebook_id: data.parent_id,
            created_time: datetime_from_millis(data.created_time),
            updated_time: datetime_from_millis(data.updated_time),
            is_todo: data.is_todo != 0,
            todo_completed: data.todo_completed != 0,
            tags,
        }
    }
}

impl NoteSnippet {
    /// Build a search result snippet, truncating the body on a character
    /// boundary.
    pub fn from_data(data: NoteData) -> Self {
        let snippet: String = data.body.chars().take(SNIPPET_MAX_CHARS).collect();
        Self {
            id: data.id,
            title: data.title,
            notebook_id: data.parent_id,
            created_time: datetime_from_millis(data.created_time),
            updated_time: datetime_from_millis(data.updated_time),
            is_todo: data.is_todo != 0,
            todo_completed: data.todo_completed != 0,
            snippet,
        }
    }
}

impl From<NotebookData> for Notebook {
    fn from(data: NotebookData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            parent_id: parent_or_none(data.parent_id),
            created_time: datetime_from_millis(data.created_time),
            updated_time: datetime_from_millis(data.updated_time),
        }
    }
}

impl From<TagData> for Tag {
    fn from(data: TagData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            created_time: datetime_from_millis(data.created_time),
            updated_time: datetime_from_millis(data.updated_time),
        }
    }
}

impl From<TagData> for TagRef {
    fn from(data: TagData) -> Self {
        Self {
            id: data.id,
            title: data.title,
        }
    }
}

impl From<ResourceData> for Resource {
    fn from(data: ResourceData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            filename: data.filename,
            mime: data.mime,
            size: data.size,
            created_time: datetime_from_millis(data.created_time),
            updated_time: datetime_from_millis(data.updated_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_data(body: &str) -> NoteData {
        NoteData {
            id: "n1".to_string(),
            title: "A note".to_string(),
            body: body.to_string(),
            parent_id: "nb1".to_string(),
            created_time: 1_704_067_200_000,
            updated_time: 1_704_153_600_000,
            is_todo: 1,
            todo_completed: 1_704_153_600_000,
        }
    }

    #[test]
    fn test_note_flags_become_bools() {
        let note = Note::from_data(note_data("body"), vec![]);
        assert!(note.is_todo);
        // Joplin stores the completion timestamp; any nonzero value means done.
        assert!(note.todo_completed);
        assert_eq!(note.notebook_id, "nb1");
        assert_eq!(note.created_time.timestamp_millis(), 1_704_067_200_000);
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(SNIPPET_MAX_CHARS + 200);
        let snippet = NoteSnippet::from_data(note_data(&long));
        assert_eq!(snippet.snippet.chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn test_snippet_keeps_short_bodies() {
        let snippet = NoteSnippet::from_data(note_data("short body"));
        assert_eq!(snippet.snippet, "short body");
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let multibyte = "é".repeat(SNIPPET_MAX_CHARS + 10);
        let snippet = NoteSnippet::from_data(note_data(&multibyte));
        assert_eq!(snippet.snippet.chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn test_notebook_empty_parent_is_root() {
        let nb = Notebook::from(NotebookData {
            id: "nb1".to_string(),
            title: "Root".to_string(),
            parent_id: String::new(),
            created_time: 1_704_067_200_000,
            updated_time: 1_704_067_200_000,
        });
        assert_eq!(nb.parent_id, None);
    }
}
