use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::integrations::PlatformConnector;

use super::session_client::SessionClient;

/// Identity -> SessionClient cache, one client per identity for the life of
/// the process. The write lock is held only for the insert, never while a
/// client is in use.
pub struct IdentityRegistry {
    connector: Arc<dyn PlatformConnector>,
    clients: RwLock<HashMap<String, Arc<SessionClient>>>,
}

impl IdentityRegistry {
    pub fn new(connector: Arc<dyn PlatformConnector>) -> Self {
        Self {
            connector,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached client for `identity`, creating an unauthenticated
    /// one on first use. Concurrent first resolutions all get the same client.
    pub async fn resolve(&self, identity: &str) -> Arc<SessionClient> {
        if let Some(client) = self.clients.read().await.get(identity) {
            return client.clone();
        }

        let mut clients = self.clients.write().await;
        clients
            .entry(identity.to_string())
            .or_insert_with(|| {
                tracing::info!("Creating Wordfeud session for {}", identity);
                Arc::new(SessionClient::new(identity, self.connector.open_session()))
            })
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }
}
