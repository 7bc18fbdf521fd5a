//! Error types for the MCP server.
//!
//! Every failure the Joplin API can produce is translated into the closed
//! set of kinds below before it leaves the client layer; nothing else in the
//! crate ever sees a raw transport error.

use serde::{Deserialize, Serialize};

/// MCP server errors.
///
/// The first six variants are the domain taxonomy surfaced to agents as a
/// category plus message plus optional detail. The remaining variants are
/// protocol-level failures of the MCP transport itself.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
pub enum JoplinError {
    /// Joplin endpoint unreachable (connection refused, timeout).
    #[error("connection error: {message}")]
    Connection {
        /// Human-readable error message
        message: String,
        /// Original transport error text
        detail: Option<String>,
    },

    /// API token rejected by Joplin (401/403).
    #[error("authentication error: {message}")]
    Auth {
        /// Human-readable error message
        message: String,
        /// Original response text
        detail: Option<String>,
    },

    /// Referenced note/notebook/tag does not exist (404).
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable error message, includes the missing id
        message: String,
        /// Original response text
        detail: Option<String>,
    },

    /// Caller-supplied input invalid, either locally or per Joplin's own
    /// validation (400/422).
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
        /// Original response text, if the rejection came from Joplin
        detail: Option<String>,
    },

    /// The notebook parent graph could not be reconstructed.
    #[error("structural inconsistency: {0}")]
    StructuralInconsistency(String),

    /// Any other Joplin-reported failure. The detail string is diagnostic
    /// only and never drives control flow.
    #[error("joplin api error: {message}")]
    Api {
        /// Human-readable error message
        message: String,
        /// Original response text
        detail: Option<String>,
    },

    /// Unknown tool requested.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArg(String),

    /// Invalid argument value.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// JSON-RPC protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Startup configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for JoplinError {
    fn from(err: std::io::Error) -> Self {
        JoplinError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for JoplinError {
    fn from(err: serde_json::Error) -> Self {
        JoplinError::Protocol(format!("JSON error: {}", err))
    }
}

/// JSON-RPC error codes.
pub mod rpc_codes {
    /// Parse error - Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found - The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params - Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JoplinError {
    /// Convert to JSON-RPC error code.
    pub fn rpc_code(&self) -> i32 {
        match self {
            JoplinError::UnknownTool(_) => rpc_codes::METHOD_NOT_FOUND,
            JoplinError::MissingArg(_)
            | JoplinError::InvalidArg { .. }
            | JoplinError::Validation { .. }
            | JoplinError::NotFound { .. } => rpc_codes::INVALID_PARAMS,
            JoplinError::Protocol(_) => rpc_codes::INVALID_REQUEST,
            _ => rpc_codes::INTERNAL_ERROR,
        }
    }

    /// Stable category identifier surfaced to agents alongside the message.
    pub fn category(&self) -> &'static str {
        match self {
            JoplinError::Connection { .. } => "connection_error",
            JoplinError::Auth { .. } => "auth_error",
            JoplinError::NotFound { .. } => "not_found",
            JoplinError::Validation { .. } => "validation_error",
            JoplinError::StructuralInconsistency(_) => "structural_inconsistency",
            JoplinError::Api { .. } => "joplin_error",
            JoplinError::UnknownTool(_) => "unknown_tool",
            JoplinError::MissingArg(_) | JoplinError::InvalidArg { .. } => "invalid_argument",
            JoplinError::Protocol(_) => "protocol_error",
            JoplinError::Config(_) => "config_error",
            JoplinError::Io(_) => "io_error",
        }
    }

    /// Original diagnostic detail, if this error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            JoplinError::Connection { detail, .. }
            | JoplinError::Auth { detail, .. }
            | JoplinError::NotFound { detail, .. }
            | JoplinError::Validation { detail, .. }
            | JoplinError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, JoplinError>;
