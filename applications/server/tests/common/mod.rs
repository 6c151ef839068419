/// Common test utilities and fixtures
use axum::Router;
use datastore_client::DatastoreClient;
use playlist_server::{create_router, services::AuthService, state::AppState};
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key";

/// Build the real router wired to a mock datastore.
pub fn create_test_app(datastore_url: &str) -> (Router, Arc<AuthService>) {
    let datastore = Arc::new(DatastoreClient::new(datastore_url).unwrap());
    let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1));
    let app_state = AppState::new(datastore, Arc::clone(&auth_service));
    (create_router(app_state), auth_service)
}
