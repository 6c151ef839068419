//! Datastore Client
//!
//! HTTP client library for the generic object datastore service.
//!
//! The datastore exposes CRUD over `objtype`-tagged records through five
//! sub-endpoints (`read`, `write`, `delete`, `update`, `read_all`).
//! List-returning calls wrap their payload in an `{"Items": [...]}`
//! envelope; write and update responses are passed through as the
//! datastore produced them.
//!
//! # Example
//!
//! ```ignore
//! use datastore_client::{DatastoreClient, ObjType, PlaylistRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DatastoreClient::new("http://cmpt756db:30002/api/v1/datastore")?;
//!
//!     let playlists: Vec<PlaylistRecord> = client.read_all(ObjType::Playlist).await?;
//!     println!("Found {} playlists", playlists.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

// Re-export main types
pub use client::{DatastoreClient, ObjType};
pub use error::{DatastoreError, Result};
pub use types::{NewPlaylistRecord, PlaylistRecord, PlaylistUpdate, Song};
