//! Note tools.
//!
//! Tools: joplin_search_notes, joplin_get_note, joplin_create_note,
//!        joplin_update_note

use serde_json::{json, Map, Value as JsonValue};

use crate::client::JoplinClient;
use crate::convert::{
    get_optional_bool, get_optional_string, get_optional_string_array, get_optional_u64,
    get_string_arg,
};
use crate::error::{JoplinError, Result};
use crate::models::{Note, NoteSnippet, TagRef};
use crate::schema;
use crate::search::SearchFilters;
use crate::tools::ToolDef;
use crate::update::{Field, NoteUpdate};

/// Fields requested for full note fetches.
const NOTE_FIELDS: &str = "id,title,body,parent_id,created_time,updated_time,is_todo,todo_completed";

/// Get all note tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "joplin_search_notes",
            "Search for notes. Filters combine conjunctively: free-text query, notebook_id, \
             tag_id, is_todo, is_completed. Alternatively pass raw_query with Joplin search \
             syntax, which overrides every other filter. Results carry a 500-character body \
             snippet; use joplin_get_note for full content. Limit defaults to 50, max 100.",
            schema!(object {
                optional: {
                    "query": string,
                    "notebook_id": string,
                    "tag_id": string,
                    "is_todo": boolean,
                    "is_completed": boolean,
                    "limit": integer,
                    "raw_query": string
                }
            }),
        ),
        ToolDef::new(
            "joplin_get_note",
            "Get a note by ID with its full markdown body and attached tags.",
            schema!(object {
                required: { "note_id": string }
            }),
        ),
        ToolDef::new(
            "joplin_create_note",
            "Create a new note. Optionally place it in a notebook, mark it as a todo, and \
             attach existing tags by ID. Returns the created note id.",
            schema!(object {
                required: { "title": string, "body": string },
                optional: { "notebook_id": string, "is_todo": boolean, "tags": array_string }
            }),
        ),
        ToolDef::new(
            "joplin_update_note",
            "Update a note. Only the supplied fields change; omitted fields keep their \
             current value. Pass an empty string to clear title or body.",
            schema!(object {
                required: { "note_id": string },
                optional: {
                    "title": string,
                    "body": string,
                    "notebook_id": string,
                    "is_todo": boolean,
                    "todo_completed": boolean
                }
            }),
        ),
    ]
}

/// Dispatch a note tool call.
pub async fn dispatch(
    client: &JoplinClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "joplin_search_notes" => {
            let filters = SearchFilters {
                query: get_optional_string(&args, "query"),
                notebook_id: get_optional_string(&args, "notebook_id"),
                tag_id: get_optional_string(&args, "tag_id"),
                is_todo: get_optional_bool(&args, "is_todo"),
                is_completed: get_optional_bool(&args, "is_completed"),
                limit: get_optional_u64(&args, "limit")?,
                raw_query: get_optional_string(&args, "raw_query"),
            };
            let limit = filters.effective_limit()?;
            let query = filters.compose();

            let results = client.search_notes(&query, NOTE_FIELDS, limit).await?;
            let snippets: Vec<NoteSnippet> =
                results.into_iter().map(NoteSnippet::from_data).collect();
            Ok(serde_json::to_value(snippets)?)
        }

        "joplin_get_note" => {
            let note_id = get_string_arg(&args, "note_id")?;
            let note = fetch_note(client, &note_id).await?;
            Ok(serde_json::to_value(note)?)
        }

        "joplin_create_note" => {
            let title = get_string_arg(&args, "title")?;
            let body = get_string_arg(&args, "body")?;
            let notebook_id = get_optional_string(&args, "notebook_id");
            let is_todo = get_optional_bool(&args, "is_todo").unwrap_or(false);
            let tags = get_optional_string_array(&args, "tags")?;

            let mut payload = Map::new();
            payload.insert("title".to_string(), JsonValue::String(title));
            payload.insert("body".to_string(), JsonValue::String(body));
            payload.insert("is_todo".to_string(), JsonValue::from(is_todo as i64));
            if let Some(notebook_id) = notebook_id {
                payload.insert("parent_id".to_string(), JsonValue::String(notebook_id));
            }

            let note_id = client.create_note(&payload).await?;

            for tag_id in tags.unwrap_or_default() {
                client.add_tag_to_note(&tag_id, &note_id).await?;
            }

            Ok(json!({ "id": note_id }))
        }

        "joplin_update_note" => {
            let note_id = get_string_arg(&args, "note_id")?;
            let update = NoteUpdate {
                title: Field::from(get_optional_string(&args, "title")),
                body: Field::from(get_optional_string(&args, "body")),
                notebook_id: Field::from(get_optional_string(&args, "notebook_id")),
                is_todo: Field::from(get_optional_bool(&args, "is_todo")),
                todo_completed: Field::from(get_optional_bool(&args, "todo_completed")),
            };

            // Nothing to change: succeed without a remote call.
            let payload = update.payload();
            if !payload.is_empty() {
                client.update_note(&note_id, &payload).await?;
            }
            Ok(JsonValue::Null)
        }

        _ => Err(JoplinError::UnknownTool(name.to_string())),
    }
}

/// Fetch a note plus its attached tags.
async fn fetch_note(client: &JoplinClient, note_id: &str) -> Result<Note> {
    let data = client.get_note(note_id, NOTE_FIELDS).await?;
    let tags = client.get_note_tags(note_id).await?;
    let tag_refs: Vec<TagRef> = tags.into_iter().map(TagRef::from).collect();
    Ok(Note::from_data(data, tag_refs))
}
