/// Playlist API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use datastore_client::{NewPlaylistRecord, ObjType, PlaylistRecord, PlaylistUpdate, Song};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub playlist_name: String,
    pub music_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSongsRequest {
    pub playlist_id: String,
    pub music_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSongsRequest {
    pub playlist_id: String,
    pub music_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenamePlaylistRequest {
    pub playlist_id: String,
    pub playlist_name: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistCollection {
    pub playlists: Vec<PlaylistRecord>,
}

/// A playlist whose song-id references have been resolved to full song
/// records. Built per response; the persisted record keeps holding ids.
#[derive(Debug, Serialize)]
pub struct EnrichedPlaylist {
    pub playlist_id: String,
    pub playlist_name: String,
    pub uid: String,
    pub music_list: Vec<Song>,
}

/// GET /api/v1/playlist/all
/// All playlists owned by the authenticated user.
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<PlaylistCollection>> {
    let playlists: Vec<PlaylistRecord> = app_state.datastore.read_all(ObjType::Playlist).await?;
    let playlists = playlists
        .into_iter()
        .filter(|p| p.uid == auth.user_id())
        .collect();
    Ok(Json(PlaylistCollection { playlists }))
}

/// GET /api/v1/playlist/:playlist_id
/// One playlist with full song records, restricted to its owner.
pub async fn get_playlist(
    Path(playlist_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<EnrichedPlaylist>> {
    let playlist = fetch_enriched_playlist(&app_state, &playlist_id).await?;
    ensure_owner(&playlist.uid, &auth)?;
    Ok(Json(playlist))
}

/// POST /api/v1/playlist/
/// Create a playlist. The owner is always the authenticated caller; a
/// `uid` supplied in the body is ignored.
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let req = require_body(payload)?;
    if req.playlist_name.is_empty() {
        return Err(ServerError::InvalidArgument(
            "playlist_name must not be empty".to_string(),
        ));
    }

    let record = NewPlaylistRecord {
        playlist_name: req.playlist_name,
        uid: auth.user_id().to_string(),
        music_list: req.music_list,
    };
    let created = app_state.datastore.write(ObjType::Playlist, &record).await?;
    Ok(Json(created))
}

/// PUT /api/v1/playlist/add_songs
/// Add songs to a playlist, set-union semantics. Every added id must
/// exist in the music collection or nothing is written.
pub async fn add_songs(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<AddSongsRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let req = require_body(payload)?;
    let playlist = fetch_playlist(&app_state, &req.playlist_id).await?;
    ensure_owner(&playlist.uid, &auth)?;

    let songs: Vec<Song> = app_state.datastore.read_all(ObjType::Music).await?;
    let known_ids: BTreeSet<&str> = songs.iter().map(|s| s.music_id.as_str()).collect();
    if !req
        .music_list
        .iter()
        .all(|id| known_ids.contains(id.as_str()))
    {
        return Err(ServerError::InvalidArgument(
            "One or more music IDs don't exist".to_string(),
        ));
    }

    let merged = merge_song_ids(&playlist.music_list, &req.music_list);
    let updated = app_state
        .datastore
        .update(
            ObjType::Playlist,
            &req.playlist_id,
            &PlaylistUpdate::music_list(merged),
        )
        .await?;
    Ok(Json(updated))
}

/// PUT /api/v1/playlist/delete_songs
/// Remove songs from a playlist. Removing an id that is not in the list
/// is a no-op, so no existence check is needed.
pub async fn delete_songs(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<DeleteSongsRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let req = require_body(payload)?;
    let playlist = fetch_playlist(&app_state, &req.playlist_id).await?;
    ensure_owner(&playlist.uid, &auth)?;

    let remaining = remove_song_ids(&playlist.music_list, &req.music_list);
    let updated = app_state
        .datastore
        .update(
            ObjType::Playlist,
            &req.playlist_id,
            &PlaylistUpdate::music_list(remaining),
        )
        .await?;
    Ok(Json(updated))
}

/// PUT /api/v1/playlist/rename
/// Change a playlist's name; the song list is untouched.
pub async fn rename_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<RenamePlaylistRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let req = require_body(payload)?;
    if req.playlist_name.is_empty() {
        return Err(ServerError::InvalidArgument(
            "playlist_name must not be empty".to_string(),
        ));
    }

    let playlist = fetch_playlist(&app_state, &req.playlist_id).await?;
    ensure_owner(&playlist.uid, &auth)?;

    let updated = app_state
        .datastore
        .update(
            ObjType::Playlist,
            &req.playlist_id,
            &PlaylistUpdate::name(req.playlist_name),
        )
        .await?;
    Ok(Json(updated))
}

/// Resolve a playlist by id; zero matches is `NotFound`.
///
/// Existence only, no owner check: the caller decides whether the
/// result may be shown or mutated.
async fn fetch_playlist(app_state: &AppState, playlist_id: &str) -> Result<PlaylistRecord> {
    let mut items: Vec<PlaylistRecord> = app_state
        .datastore
        .read(ObjType::Playlist, playlist_id)
        .await?;
    if items.is_empty() {
        return Err(ServerError::NotFound(
            "Playlist not found for this user".to_string(),
        ));
    }
    Ok(items.remove(0))
}

/// Resolve a playlist and replace its song-id list with the matching
/// full song records.
async fn fetch_enriched_playlist(
    app_state: &AppState,
    playlist_id: &str,
) -> Result<EnrichedPlaylist> {
    let playlist = fetch_playlist(app_state, playlist_id).await?;

    let songs: Vec<Song> = app_state.datastore.read_all(ObjType::Music).await?;
    let member_ids: BTreeSet<&str> = playlist.music_list.iter().map(String::as_str).collect();
    let music_list = songs
        .into_iter()
        .filter(|song| member_ids.contains(song.music_id.as_str()))
        .collect();

    Ok(EnrichedPlaylist {
        playlist_id: playlist.playlist_id,
        playlist_name: playlist.playlist_name,
        uid: playlist.uid,
        music_list,
    })
}

fn ensure_owner(owner_uid: &str, auth: &AuthenticatedUser) -> Result<()> {
    if owner_uid != auth.user_id() {
        return Err(ServerError::Forbidden(
            "Not authorized to access this playlist".to_string(),
        ));
    }
    Ok(())
}

/// Unwrap an extracted JSON body, mapping malformed or missing bodies
/// to `InvalidArgument` instead of axum's default 422.
fn require_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    let Json(inner) = payload.map_err(|e| ServerError::InvalidArgument(e.body_text()))?;
    Ok(inner)
}

/// Union of existing and added ids with duplicates removed.
fn merge_song_ids(existing: &[String], added: &[String]) -> Vec<String> {
    existing
        .iter()
        .chain(added.iter())
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Existing ids minus the ids to remove, original order preserved.
fn remove_song_ids(existing: &[String], removed: &[String]) -> Vec<String> {
    let removed: BTreeSet<&str> = removed.iter().map(String::as_str).collect();
    existing
        .iter()
        .filter(|id| !removed.contains(id.as_str()))
        .cloned()
        .collect()
}
