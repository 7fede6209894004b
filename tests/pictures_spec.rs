use homestay::config::PictureSettings;
use homestay::models::Picture;
use homestay::pictures::PictureClient;
use httpmock::prelude::*;

fn client_for(server: &MockServer, key: Option<&str>) -> PictureClient {
    PictureClient::new(&PictureSettings {
        access_key: key.map(str::to_string),
        base_url: server.base_url(),
        count: 2,
    })
}

#[tokio::test]
async fn fetches_and_maps_random_photos() {
    let server = MockServer::start_async().await;

    let photos_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/photos/random")
                .query_param("count", "2")
                .query_param("client_id", "test-key");
            then.status(200).json_body(serde_json::json!([
                {
                    "id": "p1",
                    "urls": { "small": "https://images.example/p1.jpg" },
                    "alt_description": "Rice fields at dawn"
                },
                {
                    "id": "p2",
                    "urls": { "small": "https://images.example/p2.jpg" },
                    "alt_description": null
                }
            ]));
        })
        .await;

    let pictures = client_for(&server, Some("test-key")).fetch_pictures().await;

    photos_mock.assert_async().await;
    assert_eq!(
        pictures,
        vec![
            Picture {
                id: "p1".to_string(),
                url: "https://images.example/p1.jpg".to_string(),
                alt: "Rice fields at dawn".to_string(),
            },
            Picture {
                id: "p2".to_string(),
                url: "https://images.example/p2.jpg".to_string(),
                alt: "Random image from Unsplash".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn makes_no_request_without_access_key() {
    let server = MockServer::start_async().await;

    let photos_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/photos/random");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let pictures = client_for(&server, None).fetch_pictures().await;

    assert!(pictures.is_empty());
    photos_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn swallows_server_errors() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/photos/random");
            then.status(403).body("Rate Limit Exceeded");
        })
        .await;

    let pictures = client_for(&server, Some("test-key")).fetch_pictures().await;

    assert!(pictures.is_empty());
}

#[tokio::test]
async fn swallows_malformed_bodies() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/photos/random");
            then.status(200).json_body(serde_json::json!({ "unexpected": true }));
        })
        .await;

    let pictures = client_for(&server, Some("test-key")).fetch_pictures().await;

    assert!(pictures.is_empty());
}

#[tokio::test]
async fn swallows_connection_failures() {
    let client = PictureClient::new(&PictureSettings {
        access_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        count: 1,
    });

    assert!(client.fetch_pictures().await.is_empty());
}
