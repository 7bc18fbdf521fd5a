//! Tag tools.
//!
//! Tools: joplin_list_tags, joplin_get_tag, joplin_create_tag,
//!        joplin_add_tag_to_note, joplin_remove_tag_from_note

use serde_json::{json, Map, Value as JsonValue};

use crate::client::JoplinClient;
use crate::convert::{get_optional_u64, get_string_arg};
use crate::error::{JoplinError, Result};
use crate::models::Tag;
use crate::schema;
use crate::search::clamp_list_limit;
use crate::tools::ToolDef;

/// Get all tag tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "joplin_list_tags",
            "List all tags. Limit defaults to 50, max 100.",
            schema!(object {
                optional: { "limit": integer }
            }),
        ),
        ToolDef::new(
            "joplin_get_tag",
            "Get a tag by ID.",
            schema!(object {
                required: { "tag_id": string }
            }),
        ),
        ToolDef::new(
            "joplin_create_tag",
            "Create a new tag. Returns the created tag id.",
            schema!(object {
                required: { "title": string }
            }),
        ),
        ToolDef::new(
            "joplin_add_tag_to_note",
            "Attach an existing tag to a note.",
            schema!(object {
                required: { "tag_id": string, "note_id": string }
            }),
        ),
        ToolDef::new(
            "joplin_remove_tag_from_note",
            "Detach a tag from a note. The tag itself is not deleted.",
            schema!(object {
                required: { "tag_id": string, "note_id": string }
            }),
        ),
    ]
}

/// Dispatch a tag tool call.
pub async fn dispatch(
    client: &JoplinClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "joplin_list_tags" => {
            let limit = clamp_list_limit(get_optional_u64(&args, "limit")?)?;
            let data = client.get_tags(limit).await?;
            let tags: Vec<Tag> = data.into_iter().map(Tag::from).collect();
            Ok(serde_json::to_value(tags)?)
        }

        "joplin_get_tag" => {
            let tag_id = get_string_arg(&args, "tag_id")?;
            let data = client.get_tag(&tag_id).await?;
            Ok(serde_json::to_value(Tag::from(data))?)
        }

        "joplin_create_tag" => {
            let title = get_string_arg(&args, "title")?;
            let tag_id = client.create_tag(&title).await?;
            Ok(json!({ "id": tag_id }))
        }

        "joplin_add_tag_to_note" => {
            let tag_id = get_string_arg(&args, "tag_id")?;
            let note_id = get_string_arg(&args, "note_id")?;
            client.add_tag_to_note(&tag_id, &note_id).await?;
            Ok(JsonValue::Null)
        }

        "joplin_remove_tag_from_note" => {
            let tag_id = get_string_arg(&args, "tag_id")?;
            let note_id = get_string_arg(&args, "note_id")?;
            client.remove_tag_from_note(&tag_id, &note_id).await?;
            Ok(JsonValue::Null)
        }

        _ => Err(JoplinError::UnknownTool(name.to_string())),
    }
}
