//! Playlist Server Library
//!
//! HTTP service that manages playlists of song references on top of an
//! external object datastore, with bearer-token authentication and
//! ownership enforcement.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::auth::AuthService;
pub use state::AppState;
