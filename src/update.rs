//! Sparse update payloads for notes and notebooks.
//!
//! Joplin's modify endpoints overwrite whatever fields are present in the
//! request body, so "leave this field alone" must mean "leave this key out
//! of the payload". [`Field`] keeps that distinction explicit: `Unspecified`
//! never reaches the wire, while `Set("")` and `Set(false)` do, so clearing
//! a field stays expressible.

use serde_json::{Map, Value as JsonValue};

/// A single updatable field: either left alone or set to a new value.
///
/// Distinct from `Option` on purpose. `Set(String::new())` clears a text
/// field; `Unspecified` omits it from the payload entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    /// Field was not supplied; it must not appear in the payload.
    #[default]
    Unspecified,
    /// Field was supplied and will be sent, even if the value is empty.
    Set(T),
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Set(v),
            None => Field::Unspecified,
        }
    }
}

/// Requested changes to a note. Every field defaults to `Unspecified`.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    /// New title.
    pub title: Field<String>,
    /// New markdown body.
    pub body: Field<String>,
    /// Move the note to this notebook.
    pub notebook_id: Field<String>,
    /// Toggle todo status.
    pub is_todo: Field<bool>,
    /// Toggle todo completion.
    pub todo_completed: Field<bool>,
}

impl NoteUpdate {
    /// Build the wire payload. The key set equals exactly the set of `Set`
    /// fields; todo flags are encoded as Joplin's 0/1 integers and
    /// `notebook_id` maps to the wire key `parent_id`.
    ///
    /// An empty payload means the caller should skip the remote call
    /// entirely; the update then succeeds as a no-op.
    pub fn payload(&self) -> Map<String, JsonValue> {
        let mut payload = Map::new();
        if let Field::Set(title) = &self.title {
            payload.insert("title".to_string(), JsonValue::String(title.clone()));
        }
        if let Field::Set(body) = &self.body {
            payload.insert("body".to_string(), JsonValue::String(body.clone()));
        }
        if let Field::Set(notebook_id) = &self.notebook_id {
            payload.insert("parent_id".to_string(), JsonValue::String(notebook_id.clone()));
        }
        if let Field::Set(is_todo) = &self.is_todo {
            payload.insert("is_todo".to_string(), JsonValue::from(*is_todo as i64));
        }
        if let Field::Set(done) = &self.todo_completed {
            payload.insert("todo_completed".to_string(), JsonValue::from(*done as i64));
        }
        payload
    }
}

/// Requested changes to a notebook.
#[derive(Debug, Clone, Default)]
pub struct NotebookUpdate {
    /// New title.
    pub title: Field<String>,
    /// Move the notebook under this parent.
    pub parent_id: Field<String>,
}

impl NotebookUpdate {
    /// Build the wire payload; same contract as [`NoteUpdate::payload`].
    pub fn payload(&self) -> Map<String, JsonValue> {
        let mut payload = Map::new();
        if let Field::Set(title) = &self.title {
            payload.insert("title".to_string(), JsonValue::String(title.clone()));
        }
        if let Field::Set(parent_id) = &self.parent_id {
            payload.insert("parent_id".to_string(), JsonValue::String(parent_id.clone()));
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unspecified_fields_never_appear() {
        let update = NoteUpdate {
            title: Field::Set("New Title".to_string()),
            ..Default::default()
        };
        let payload = update.payload();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("title"), Some(&json!("New Title")));
    }

    #[test]
    fn test_explicit_empty_values_are_sent() {
        let update = NoteUpdate {
            body: Field::Set(String::new()),
            todo_completed: Field::Set(false),
            ..Default::default()
        };
        let payload = update.payload();
        assert_eq!(payload.get("body"), Some(&json!("")));
        assert_eq!(payload.get("todo_completed"), Some(&json!(0)));
        assert!(!payload.contains_key("title"));
    }

    #[test]
    fn test_todo_flags_use_wire_integers() {
        let update = NoteUpdate {
            is_todo: Field::Set(true),
            ..Default::default()
        };
        assert_eq!(update.payload().get("is_todo"), Some(&json!(1)));
    }

    #[test]
    fn test_notebook_id_maps_to_parent_id() {
        let update = NoteUpdate {
            notebook_id: Field::Set("nb2".to_string()),
            ..Default::default()
        };
        let payload = update.payload();
        assert_eq!(payload.get("parent_id"), Some(&json!("nb2")));
        assert!(!payload.contains_key("notebook_id"));
    }

    #[test]
    fn test_empty_update_has_empty_payload() {
        assert!(NoteUpdate::default().payload().is_empty());
        assert!(NotebookUpdate::default().payload().is_empty());
    }

    #[test]
    fn test_field_from_option() {
        assert_eq!(Field::from(Some(1)), Field::Set(1));
        assert_eq!(Field::<i32>::from(None), Field::Unspecified);
    }
}
