//! # joplin-mcp
//!
//! MCP (Model Context Protocol) server for the Joplin note-taking app.
//!
//! This crate provides an MCP server that exposes Joplin operations as tools
//! for AI agents, proxied to the Joplin Data API (the Web Clipper service).
//! It implements the MCP protocol over stdin/stdout using JSON-RPC 2.0.
//!
//! ## Features
//!
//! - **15 tools** covering notes, notebooks, tags and resources: search,
//!   read, create and update — nothing here ever deletes a note, notebook
//!   or tag; the only destructive operation is detaching a tag from a note
//! - **Sparse updates**: update tools only touch the fields you pass;
//!   omitted fields are never sent to Joplin
//! - **Notebook hierarchy**: the flat notebook list is rebuilt into a
//!   nested tree, tolerating orphaned and even cyclic parent references
//! - **Stable errors**: every Joplin failure is translated into a closed
//!   set of categories (connection, auth, not-found, validation, api)
//!
//! ## Usage
//!
//! The server is typically run as an executable and configured in AI tools
//! like Claude Desktop:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "joplin": {
//!       "command": "/path/to/joplin-mcp",
//!       "env": { "JOPLIN_API_TOKEN": "..." }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! For testing or embedding, you can use the library API:
//!
//! ```no_run
//! use joplin_mcp::{Config, JoplinClient, McpServer};
//!
//! let config = Config::resolve(Some("token".into()), None, None).expect("config");
//! let client = JoplinClient::new(config);
//! let mut server = McpServer::new(client);
//!
//! // Run the server (reads from stdin, writes to stdout)
//! // server.run().await.expect("Server error");
//! ```
//!
//! ## Concurrency
//!
//! [`JoplinClient`] is `Clone + Send + Sync`; clones share one reqwest
//! connection pool, so concurrent callers need no external locking. The
//! shipped stdio server handles requests sequentially. Operations that
//! issue more than one remote call (notebook tree, note-with-tags,
//! create-with-tags) have no atomicity across those calls; a concurrent
//! mutation between them can yield a transiently inconsistent view.

#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod error;
mod models;
mod search;
mod server;
mod tools;
mod tree;
mod update;

pub use client::JoplinClient;
pub use config::Config;
pub use error::{JoplinError, Result};
pub use models::{Note, Notebook, NotebookTreeNode, NoteSnippet, Resource, Tag, TagRef};
pub use search::SearchFilters;
pub use server::{JsonRpcRequest, JsonRpcResponse, McpServer};
pub use tools::{ToolDef, ToolRegistry};
pub use tree::build_notebook_tree;
pub use update::{Field, NotebookUpdate, NoteUpdate};
