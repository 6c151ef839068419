/// Shared application state
use crate::services::AuthService;
use datastore_client::DatastoreClient;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Immutable after startup; handlers only read from it, so no locking is
/// needed across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<DatastoreClient>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(datastore: Arc<DatastoreClient>, auth_service: Arc<AuthService>) -> Self {
        Self {
            datastore,
            auth_service,
        }
    }
}
