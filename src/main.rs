//! MCP server for the Joplin note-taking app.
//!
//! Run with `JOPLIN_API_TOKEN=... joplin-mcp`, or pass `--token` directly.
//! Joplin must be running with the Web Clipper service enabled.

use clap::Parser;
use tracing_subscriber::EnvFilter;

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

use client::JoplinClient;
use config::Config;
use server::McpServer;

/// MCP server for the Joplin note-taking app.
///
/// Exposes note, notebook, tag and resource operations as MCP tools for AI
/// agents. Communicates via JSON-RPC 2.0 over stdin/stdout.
#[derive(Parser)]
#[command(name = "joplin-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Joplin API token. Falls back to the JOPLIN_API_TOKEN environment
    /// variable. Get yours from Joplin: Tools > Options > Web Clipper.
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Joplin server host. Falls back to JOPLIN_HOST, then "localhost".
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Joplin server port. Falls back to JOPLIN_PORT, then 41184.
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Enable debug logging to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Set up logging. stdout carries the protocol, so logs go to stderr.
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("joplin_mcp=debug".parse().unwrap()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    // Resolve configuration; a missing token is fatal.
    let config = match Config::resolve(args.token, args.host, args.port) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client = JoplinClient::new(config);
    let mut server = McpServer::new(client);

    // Run the server
    if let Err(e) = server.run().await {
        eprintln!("Error: Server error: {}", e);
        std::process::exit(1);
    }
}
