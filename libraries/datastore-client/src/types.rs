//! Record types stored in the datastore.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A playlist record as persisted by the datastore.
///
/// `uid` is the owning user and is set once at creation; `music_list`
/// holds song-id references, not full song records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub playlist_id: String,
    pub playlist_name: String,
    pub uid: String,
    #[serde(default)]
    pub music_list: Vec<String>,
}

/// Fields sent when creating a playlist record.
///
/// The datastore assigns `playlist_id`; the client injects the `objtype`
/// discriminator on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylistRecord {
    pub playlist_name: String,
    pub uid: String,
    pub music_list: Vec<String>,
}

/// Partial update for a playlist record.
///
/// Only the populated fields are sent; the datastore leaves the rest of
/// the record untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_list: Option<Vec<String>>,
}

impl PlaylistUpdate {
    /// Update that replaces the song-id list.
    pub fn music_list(music_list: Vec<String>) -> Self {
        Self {
            playlist_name: None,
            music_list: Some(music_list),
        }
    }

    /// Update that renames the playlist.
    pub fn name(playlist_name: impl Into<String>) -> Self {
        Self {
            playlist_name: Some(playlist_name.into()),
            music_list: None,
        }
    }
}

/// A song record owned by the music service.
///
/// Read-only from this side; only `music_id` is interpreted, every other
/// field (e.g. `Artist`, `SongTitle`) is carried through untouched so
/// enriched responses echo the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub music_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Response envelope used by the datastore for list-returning calls.
///
/// The default is spelled as a path so serde does not demand
/// `T: Default` for the envelope to deserialize.
#[derive(Debug, Deserialize)]
pub(crate) struct Items<T> {
    #[serde(rename = "Items", default = "Vec::new")]
    pub items: Vec<T>,
}
