//! Notebook tools.
//!
//! Tools: joplin_list_notebooks, joplin_get_notebook, joplin_create_notebook,
//!        joplin_update_notebook, joplin_get_notebook_tree

use serde_json::{json, Map, Value as JsonValue};

use crate::client::JoplinClient;
use crate::convert::{get_optional_string, get_optional_u64, get_string_arg};
use crate::error::{JoplinError, Result};
use crate::models::Notebook;
use crate::schema;
use crate::search::clamp_list_limit;
use crate::tools::ToolDef;
use crate::tree::build_notebook_tree;
use crate::update::{Field, NotebookUpdate};

/// Fields requested for notebook fetches.
const NOTEBOOK_FIELDS: &str = "id,title,parent_id,created_time,updated_time";

/// Get all notebook tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "joplin_list_notebooks",
            "List notebooks as a flat list; each entry carries its parent_id. \
             Use joplin_get_notebook_tree for the nested hierarchy. \
             Limit defaults to 50, max 100.",
            schema!(object {
                optional: { "limit": integer }
            }),
        ),
        ToolDef::new(
            "joplin_get_notebook",
            "Get a notebook by ID.",
            schema!(object {
                required: { "notebook_id": string }
            }),
        ),
        ToolDef::new(
            "joplin_create_notebook",
            "Create a new notebook, optionally nested under a parent notebook. \
             Returns the created notebook id.",
            schema!(object {
                required: { "title": string },
                optional: { "parent_id": string }
            }),
        ),
        ToolDef::new(
            "joplin_update_notebook",
            "Update a notebook. Only the supplied fields change; omitted fields keep \
             their current value.",
            schema!(object {
                required: { "notebook_id": string },
                optional: { "title": string, "parent_id": string }
            }),
        ),
        ToolDef::new(
            "joplin_get_notebook_tree",
            "Get the complete notebook hierarchy as a forest of nested nodes, \
             ordered by title at every level.",
            schema!(object {}),
        ),
    ]
}

/// Dispatch a notebook tool call.
pub async fn dispatch(
    client: &JoplinClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "joplin_list_notebooks" => {
            let limit = clamp_list_limit(get_optional_u64(&args, "limit")?)?;
            let data = client.get_notebooks(NOTEBOOK_FIELDS, limit).await?;
            let notebooks: Vec<Notebook> = data.into_iter().map(Notebook::from).collect();
            Ok(serde_json::to_value(notebooks)?)
        }

        "joplin_get_notebook" => {
            let notebook_id = get_string_arg(&args, "notebook_id")?;
            let data = client.get_notebook(&notebook_id).await?;
            Ok(serde_json::to_value(Notebook::from(data))?)
        }

        "joplin_create_notebook" => {
            let title = get_string_arg(&args, "title")?;
            let parent_id = get_optional_string(&args, "parent_id");

            let mut payload = Map::new();
            payload.insert("title".to_string(), JsonValue::String(title));
            if let Some(parent_id) = parent_id {
                payload.insert("parent_id".to_string(), JsonValue::String(parent_id));
            }

            let notebook_id = client.create_notebook(&payload).await?;
            Ok(json!({ "id": notebook_id }))
        }

        "joplin_update_notebook" => {
            let notebook_id = get_string_arg(&args, "notebook_id")?;
            let update = NotebookUpdate {
                title: Field::from(get_optional_string(&args, "title")),
                parent_id: Field::from(get_optional_string(&args, "parent_id")),
            };

            let payload = update.payload();
            if !payload.is_empty() {
                client.update_notebook(&notebook_id, &payload).await?;
            }
            Ok(JsonValue::Null)
        }

        "joplin_get_notebook_tree" => {
            // One remote call for the flat collection; the forest is derived
            // locally and never cached.
            let data = client.get_notebooks(NOTEBOOK_FIELDS, usize::MAX).await?;
            let notebooks: Vec<Notebook> = data.into_iter().map(Notebook::from).collect();
            let forest = build_notebook_tree(&notebooks)?;
            Ok(serde_json::to_value(forest)?)
        }

        _ => Err(JoplinError::UnknownTool(name.to_string())),
    }
}
