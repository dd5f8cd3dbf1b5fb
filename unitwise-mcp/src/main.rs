//! Unitwise MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Logs go to stderr; stdout carries
//! only protocol responses.
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - list_categories: List unit categories
//! - list_units: List the units of a category
//! - export_csv: Export the last conversion as CSV
//! - set_theme / toggle_theme: Select the UI theme
//! - session: Show the current session state
//!
//! Resources:
//! - unitwise://export/conversion_results.csv - Last conversion as CSV

mod server;

use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use unitwise::Session;

use crate::server::{Server, PROTOCOL_VERSION, SERVER_VERSION};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn write_line(stdout: &mut Stdout, line: &str) -> io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let session = Session::from_env();
    info!("Unitwise MCP Server v{} started", SERVER_VERSION);
    info!("Protocol: {}", PROTOCOL_VERSION);
    info!(
        "Export dir: {}, theme: {}",
        session.config().export_dir.display(),
        session.theme()
    );

    let mut server = Server::new(session);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Server ready, waiting for requests...");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("Received: {} bytes", line.len());

        let Some(response) = server.dispatch(line) else {
            continue;
        };

        let response_json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!("Error serializing response: {}", e);
                continue;
            }
        };

        if let Err(e) = write_line(&mut stdout, &response_json).await {
            error!("Error writing response: {}", e);
            break;
        }
    }

    if let Some(last) = server.session().last() {
        debug!("Last conversion: {}", last);
    }
    info!("Client disconnected, shutting down");
    Ok(())
}
