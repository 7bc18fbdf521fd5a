//! Resource tools.
//!
//! Tools: joplin_get_note_resources

use serde_json::{Map, Value as JsonValue};

use crate::client::JoplinClient;
use crate::convert::get_string_arg;
use crate::error::{JoplinError, Result};
use crate::models::Resource;
use crate::schema;
use crate::tools::ToolDef;

/// Get all resource tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![ToolDef::new(
        "joplin_get_note_resources",
        "List the resources (attachments) of a note: id, title, filename, mime type \
         and size. Binary content is not returned.",
        schema!(object {
            required: { "note_id": string }
        }),
    )]
}

/// Dispatch a resource tool call.
pub async fn dispatch(
    client: &JoplinClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "joplin_get_note_resources" => {
            let note_id = get_string_arg(&args, "note_id")?;
            let data = client.get_note_resources(&note_id).await?;
            let resources: Vec<Resource> = data.into_iter().map(Resource::from).collect();
            Ok(serde_json::to_value(resources)?)
        }

        _ => Err(JoplinError::UnknownTool(name.to_string())),
    }
}
