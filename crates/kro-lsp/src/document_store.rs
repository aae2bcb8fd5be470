//! Registry of open documents.

use std::collections::HashMap;
use std::sync::Arc;

use kro_core::DocumentSnapshot;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

/// Storage for open documents, keyed by URI.
///
/// Snapshots are immutable; an edit replaces the whole entry.
#[tower_lsp::async_trait]
pub trait DocumentRegistry: Send + Sync {
    async fn get(&self, uri: &Url) -> Option<Arc<DocumentSnapshot>>;

    async fn put(&self, uri: Url, document: DocumentSnapshot);

    async fn remove(&self, uri: &Url) -> Option<Arc<DocumentSnapshot>>;

    async fn len(&self) -> usize;
}

/// In-memory registry behind an async read/write lock
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<Url, Arc<DocumentSnapshot>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[tower_lsp::async_trait]
impl DocumentRegistry for InMemoryDocumentStore {
    async fn get(&self, uri: &Url) -> Option<Arc<DocumentSnapshot>> {
        self.documents.read().await.get(uri).cloned()
    }

    async fn put(&self, uri: Url, document: DocumentSnapshot) {
        self.documents.write().await.insert(uri, Arc::new(document));
    }

    async fn remove(&self, uri: &Url) -> Option<Arc<DocumentSnapshot>> {
        self.documents.write().await.remove(uri)
    }

    async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}
