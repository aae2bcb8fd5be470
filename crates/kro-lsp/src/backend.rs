//! LSP backend implementation for kro.
//!
//! Implements the Language Server Protocol using tower-lsp. Every change
//! re-validates the full document text; there is no incremental state.

use std::sync::Arc;

use kro_core::{DocumentSnapshot, LintConfig, CONFIG_FILE_NAME};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::completion_provider::completion_items_for_document;
use crate::diagnostic_mapper::to_lsp_diagnostics;
use crate::document_store::{DocumentRegistry, InMemoryDocumentStore};

/// Diagnostic published when the validation task itself fails.
fn internal_error_diagnostic(message: String) -> Diagnostic {
    Diagnostic {
        range: Range::default(),
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(NumberOrString::String("kro::internal-error".to_string())),
        code_description: None,
        source: Some("kro".to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}

/// LSP backend that handles validation and completion requests.
///
/// The document registry is the only mutable shared state. It may be shared
/// between several connections (see [`crate::start_tcp_server`]).
pub struct Backend {
    client: Client,
    /// Replaced once if `.kro-lsp.toml` is found during initialize().
    config: RwLock<Arc<LintConfig>>,
    documents: Arc<dyn DocumentRegistry>,
}

impl Backend {
    /// Create a backend with its own in-memory document registry.
    pub fn new(client: Client) -> Self {
        Self::with_registry(client, Arc::new(InMemoryDocumentStore::new()))
    }

    /// Create a backend over an existing document registry.
    pub fn with_registry(client: Client, documents: Arc<dyn DocumentRegistry>) -> Self {
        Self {
            client,
            config: RwLock::new(Arc::new(LintConfig::default())),
            documents,
        }
    }

    /// Validate the stored snapshot for `uri` and publish the result.
    ///
    /// Validation is CPU-bound and synchronous, so it runs in a blocking task.
    async fn validate_and_publish(&self, uri: Url) {
        let Some(document) = self.documents.get(&uri).await else {
            tracing::debug!(%uri, "no open document to validate");
            return;
        };

        let config = Arc::clone(&*self.config.read().await);
        let result =
            tokio::task::spawn_blocking(move || kro_core::validate_document(&document, &config))
                .await;

        let diagnostics = match result {
            Ok(diagnostics) => {
                tracing::debug!(%uri, count = diagnostics.len(), "publishing diagnostics");
                to_lsp_diagnostics(&diagnostics)
            }
            Err(e) => {
                tracing::error!(%uri, error = %e, "validation task failed");
                vec![internal_error_diagnostic(format!("Internal error: {}", e))]
            }
        };

        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    async fn load_workspace_config(&self, root: &std::path::Path) {
        let config_path = root.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return;
        }

        match LintConfig::load(&config_path) {
            Ok(loaded) => {
                tracing::info!(path = %config_path.display(), "loaded workspace config");
                *self.config.write().await = Arc::new(loaded);
            }
            Err(e) => {
                // Keep the defaults.
                tracing::warn!(path = %config_path.display(), error = %e, "invalid config");
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Failed to load {}: {}", CONFIG_FILE_NAME, e),
                    )
                    .await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(root_path) = params.root_uri.and_then(|uri| uri.to_file_path().ok()) {
            self.load_workspace_config(&root_path).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![
                        ".".to_string(),
                        ":".to_string(),
                        " ".to_string(),
                    ]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "kro-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("client initialized");
        self.client
            .log_message(MessageType::INFO, "Kro LSP Server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        tracing::debug!(uri = %doc.uri, "did_open");
        self.documents
            .put(
                doc.uri.clone(),
                DocumentSnapshot::new(doc.uri.as_str(), doc.text, doc.language_id),
            )
            .await;
        self.validate_and_publish(doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the first change carries the whole text.
        let Some(change) = params.content_changes.into_iter().next() else {
            return;
        };
        tracing::debug!(%uri, "did_change");

        let language_id = self
            .documents
            .get(&uri)
            .await
            .map(|existing| existing.language_id.clone())
            .unwrap_or_default();
        self.documents
            .put(
                uri.clone(),
                DocumentSnapshot::new(uri.as_str(), change.text, language_id),
            )
            .await;
        self.validate_and_publish(uri).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(text) = params.text {
            let language_id = self
                .documents
                .get(&uri)
                .await
                .map(|existing| existing.language_id.clone())
                .unwrap_or_default();
            self.documents
                .put(uri.clone(), DocumentSnapshot::new(uri.as_str(), text, language_id))
                .await;
        }
        self.validate_and_publish(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!(%uri, "did_close");
        self.documents.remove(&uri).await;
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let items = match self.documents.get(uri).await {
            Some(document) => completion_items_for_document(&document.text, position),
            None => {
                tracing::debug!(%uri, "completion for unknown document");
                Vec::new()
            }
        };

        Ok(Some(CompletionResponse::Array(items)))
    }
}
