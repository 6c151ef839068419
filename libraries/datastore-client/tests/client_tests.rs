//! Tests for the datastore client library.
//!
//! These tests use a mock server to verify wire behavior without
//! requiring a real datastore deployment.

use datastore_client::{
    DatastoreClient, DatastoreError, NewPlaylistRecord, ObjType, PlaylistRecord, PlaylistUpdate,
    Song,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        let client = DatastoreClient::new("http://localhost:30002/api/v1/datastore");
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = DatastoreClient::new("");
        match result.unwrap_err() {
            DatastoreError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = DatastoreClient::new("cmpt756db:30002/api/v1/datastore");
        match result.unwrap_err() {
            DatastoreError::InvalidUrl(msg) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            other => panic!("Expected InvalidUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let client = DatastoreClient::new("http://localhost:30002/api/v1/datastore/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:30002/api/v1/datastore");
    }
}

// =============================================================================
// Read Tests
// =============================================================================

mod read {
    use super::*;

    #[tokio::test]
    async fn test_read_returns_matching_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/read"))
            .and(query_param("objtype", "playlist"))
            .and(query_param("objkey", "p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [{
                    "playlist_id": "p1",
                    "playlist_name": "Road Trip",
                    "uid": "u1",
                    "music_list": ["s1", "s2"]
                }]
            })))
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let items: Vec<PlaylistRecord> = client.read(ObjType::Playlist, "p1").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].playlist_id, "p1");
        assert_eq!(items[0].playlist_name, "Road Trip");
        assert_eq!(items[0].uid, "u1");
        assert_eq!(items[0].music_list, vec!["s1", "s2"]);
    }

    #[tokio::test]
    async fn test_read_missing_record_is_empty_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Items": [] })))
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let items: Vec<PlaylistRecord> = client.read(ObjType::Playlist, "missing").await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_read_all_preserves_unknown_song_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/read_all"))
            .and(query_param("objtype", "music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [
                    {"music_id": "s1", "Artist": "Nina Simone", "SongTitle": "Feeling Good"},
                    {"music_id": "s2", "Artist": "Tom Waits", "SongTitle": "Ol' 55"}
                ]
            })))
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let songs: Vec<Song> = client.read_all(ObjType::Music).await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].music_id, "s1");
        assert_eq!(songs[0].fields["Artist"], json!("Nina Simone"));

        // Round-trip must echo the extra fields
        let echoed = serde_json::to_value(&songs[1]).unwrap();
        assert_eq!(echoed["SongTitle"], json!("Ol' 55"));
    }

    #[tokio::test]
    async fn test_non_2xx_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/read_all"))
            .respond_with(ResponseTemplate::new(500).set_body_string("table offline"))
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let result: Result<Vec<Song>, _> = client.read_all(ObjType::Music).await;

        match result.unwrap_err() {
            DatastoreError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "table offline");
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/read_all"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let result: Result<Vec<Song>, _> = client.read_all(ObjType::Music).await;

        assert!(matches!(result.unwrap_err(), DatastoreError::Parse(_)));
    }
}

// =============================================================================
// Write / Update / Delete Tests
// =============================================================================

mod mutation {
    use super::*;

    #[tokio::test]
    async fn test_write_injects_objtype_and_passes_response_through() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/write"))
            .and(body_partial_json(json!({
                "objtype": "playlist",
                "playlist_name": "Road Trip",
                "uid": "u1",
                "music_list": []
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist_id": "p-new"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let record = NewPlaylistRecord {
            playlist_name: "Road Trip".to_string(),
            uid: "u1".to_string(),
            music_list: vec![],
        };
        let created = client.write(ObjType::Playlist, &record).await.unwrap();

        assert_eq!(created["playlist_id"], json!("p-new"));
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/update"))
            .and(query_param("objtype", "playlist"))
            .and(query_param("objkey", "p1"))
            .and(body_partial_json(json!({ "music_list": ["s1", "s2"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let changes = PlaylistUpdate::music_list(vec!["s1".to_string(), "s2".to_string()]);
        let updated = client.update(ObjType::Playlist, "p1", &changes).await.unwrap();

        assert_eq!(updated["ok"], json!(true));

        // A music_list update must not carry a playlist_name field at all
        let body = serde_json::to_value(&changes).unwrap();
        assert!(body.get("playlist_name").is_none());
    }

    #[test]
    fn test_rename_update_leaves_music_list_untouched() {
        let changes = PlaylistUpdate::name("Evening Drive");
        let body = serde_json::to_value(&changes).unwrap();

        assert_eq!(body["playlist_name"], json!("Evening Drive"));
        assert!(body.get("music_list").is_none());
    }

    #[tokio::test]
    async fn test_delete_by_key() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/delete"))
            .and(query_param("objtype", "playlist"))
            .and(query_param("objkey", "p1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        client.delete(ObjType::Playlist, "p1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_status() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/delete"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such key"))
            .mount(&server)
            .await;

        let client = DatastoreClient::new(server.uri()).unwrap();
        let result = client.delete(ObjType::Playlist, "ghost").await;

        match result.unwrap_err() {
            DatastoreError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("Expected Status error, got {other:?}"),
        }
    }
}
