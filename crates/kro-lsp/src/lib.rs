//! # kro-lsp
//!
//! Language Server Protocol implementation for kro.
//!
//! Provides real-time validation and section-aware completion for
//! ResourceGraphDefinition documents in editors that support LSP.
//!
//! ## Features
//!
//! - Diagnostics on open, change, and save (YAML syntax, embedded CEL
//!   expressions, required fields)
//! - Completion for top-level keys, `spec` sections, and expression variables
//! - Configuration from `.kro-lsp.toml` in the workspace root
//!
//! ## Usage
//!
//! ```bash
//! kro-lsp                      # stdio
//! kro-lsp --lsp-addr 127.0.0.1:5001  # TCP
//! ```

mod backend;
mod completion_provider;
mod diagnostic_mapper;
mod document_store;

pub use backend::Backend;
pub use completion_provider::completion_items_for_document;
pub use diagnostic_mapper::{to_lsp_diagnostic, to_lsp_diagnostics};
pub use document_store::{DocumentRegistry, InMemoryDocumentStore};

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};

/// Start the LSP server over stdin/stdout.
///
/// Runs until the client requests shutdown.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a fatal error.
pub async fn start_server() -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}

/// Listen on `addr` and serve every accepted connection.
///
/// All connections share one document registry, so a document opened by one
/// client is visible to completion requests from another.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or accepting fails.
pub async fn start_tcp_server(addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "kro-lsp listening");

    let registry: Arc<dyn DocumentRegistry> = Arc::new(InMemoryDocumentStore::new());

    loop {
        let (stream, peer) = listener.accept().await?;
        tracing::info!(%peer, "client connected");

        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            let (service, socket) =
                LspService::new(move |client| Backend::with_registry(client, registry));
            Server::new(read, write, socket).serve(service).await;
            tracing::info!(%peer, "client disconnected");
        });
    }
}
