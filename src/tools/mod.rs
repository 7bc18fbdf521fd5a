//! Tool registry and category definitions.
//!
//! Provides the infrastructure for registering and dispatching MCP tools.
//! Tools are grouped by entity: notes, notebooks, tags, resources.

pub mod notebooks;
pub mod notes;
pub mod resources;
pub mod tags;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::client::JoplinClient;
use crate::error::{JoplinError, Result};

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "joplin_search_notes")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create a new registry with all tools registered.
    pub fn new() -> Self {
        let mut tools = Vec::new();

        tools.extend(notes::tools());
        tools.extend(notebooks::tools());
        tools.extend(tags::tools());
        tools.extend(resources::tools());

        Self { tools }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Dispatch a tool call to the appropriate handler.
    pub async fn dispatch(
        &self,
        client: &JoplinClient,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<JsonValue> {
        match name {
            "joplin_search_notes" | "joplin_get_note" | "joplin_create_note"
            | "joplin_update_note" => notes::dispatch(client, name, args).await,

            "joplin_list_notebooks" | "joplin_get_notebook" | "joplin_create_notebook"
            | "joplin_update_notebook" | "joplin_get_notebook_tree" => {
                notebooks::dispatch(client, name, args).await
            }

            "joplin_list_tags" | "joplin_get_tag" | "joplin_create_tag"
            | "joplin_add_tag_to_note" | "joplin_remove_tag_from_note" => {
                tags::dispatch(client, name, args).await
            }

            "joplin_get_note_resources" => resources::dispatch(client, name, args).await,

            _ => Err(JoplinError::UnknownTool(name.to_string())),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut required = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? }
    }) => {{
        let mut required = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only optional properties
    (object {
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut props = serde_json::Map::new();
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": []
        })
    }};

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type integer) => { serde_json::json!({"type": "integer"}) };
    (@type boolean) => { serde_json::json!({"type": "boolean"}) };
    (@type array_string) => { serde_json::json!({"type": "array", "items": {"type": "string"}}) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lists_all_tools() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 15);
        assert!(names.contains(&"joplin_search_notes"));
        assert!(names.contains(&"joplin_get_notebook_tree"));
        assert!(names.contains(&"joplin_remove_tag_from_note"));
        assert!(names.contains(&"joplin_get_note_resources"));
    }

    #[test]
    fn test_no_delete_tools_exposed() {
        // The only destructive operation is detaching a tag from a note.
        let registry = ToolRegistry::new();
        for tool in registry.tools() {
            assert!(
                !tool.name.contains("delete"),
                "unexpected delete tool: {}",
                tool.name
            );
        }
    }

    #[test]
    fn test_schema_macro_shapes() {
        let schema = schema!(object {
            required: { "note_id": string },
            optional: { "limit": integer, "tags": array_string }
        });
        assert_eq!(schema["required"], serde_json::json!(["note_id"]));
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["properties"]["tags"]["items"]["type"], "string");
    }
}
