//! Media API integration tests.
//!
//! Run with: `cargo test -p glbcdn-api --test media_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{file_form, setup_default_app, setup_test_app, spawn_upstream};
use serde_json::{json, Value};

#[tokio::test]
async fn test_image_upload_list_delete_roundtrip() {
    let app = setup_default_app();
    let client = app.client();

    let response = client
        .post("/api/media/upload")
        .multipart(file_form("pic.png", b"png-bytes".to_vec()))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "pic.png");
    assert_eq!(body["type"], "image");
    assert_eq!(body["size"], 9);
    assert_eq!(body["message"], "Image uploaded successfully");
    assert_eq!(body["fileUrl"], "/images/pic.png");

    let response = client.get("/api/media").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["media"][0]["name"], "pic.png");
    assert_eq!(body["media"][0]["type"], "image");
    assert_eq!(body["media"][0]["size"], 9);
    assert_eq!(body["types"]["images"], 1);
    assert_eq!(body["types"]["videos"], 0);

    let response = client.delete("/api/media/images/pic.png").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "images");

    let body: Value = client.get("/api/media").await.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_media_upload_dedupes() {
    let app = setup_default_app();
    let client = app.client();

    for expected in ["pic.png", "pic_1.png"] {
        let response = client
            .post("/api/media/upload")
            .multipart(file_form("pic.png", b"png".to_vec()))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["filename"], expected);
    }
}

#[tokio::test]
async fn test_size_ceiling_depends_on_media_type() {
    let app = setup_default_app();
    let client = app.client();
    let payload = vec![0u8; 21 * 1024 * 1024];

    // 21 MB is over the image ceiling
    let response = client
        .post("/api/media/upload")
        .multipart(file_form("big.jpg", payload.clone()))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "File size exceeds 20MB limit for image");

    // The same payload is fine as a video
    let response = client
        .post("/api/media/upload")
        .multipart(file_form("big.mp4", payload))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["type"], "video");
}

#[tokio::test]
async fn test_unsupported_extension_rejected() {
    let app = setup_default_app();
    let client = app.client();

    let response = client
        .post("/api/media/upload")
        .multipart(file_form("doc.pdf", b"pdf".to_vec()))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Unsupported file type. Supported: images (jpg, png, gif, webp, svg) and videos (mp4, webm, mov)"
    );
}

#[tokio::test]
async fn test_declared_type_overrides_extension() {
    let app = setup_default_app();
    let client = app.client();

    // Declared video with an image extension fails the whitelist check
    let form = MultipartForm::new()
        .add_text("type", "video")
        .add_part("file", Part::bytes(b"png".to_vec()).file_name("pic.png"));
    let response = client.post("/api/media/upload").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .expect("error string")
        .starts_with("Invalid file extension for video. Allowed:"));
}

#[tokio::test]
async fn test_url_upload_dedupes_and_forces_extension() {
    let app = setup_default_app();
    let client = app.client();
    let upstream = spawn_upstream(b"image-bytes").await;

    // Remote path has no usable extension; declared type forces .jpg
    let response = client
        .post("/api/media/upload")
        .json(&json!({
            "url": format!("{}/file/snapshot", upstream),
            "type": "image",
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["filename"], "snapshot.jpg");
    assert_eq!(body["message"], "Image uploaded successfully from URL");

    // Same URL again gets a collision-free name
    let response = client
        .post("/api/media/upload")
        .json(&json!({
            "url": format!("{}/file/snapshot", upstream),
            "type": "image",
        }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["filename"], "snapshot_1.jpg");
}

#[tokio::test]
async fn test_media_list_type_filter() {
    let app = setup_default_app();
    let client = app.client();

    client
        .post("/api/media/upload")
        .multipart(file_form("a.png", b"img".to_vec()))
        .await;
    client
        .post("/api/media/upload")
        .multipart(file_form("b.mp4", b"vid".to_vec()))
        .await;

    let body: Value = client
        .get("/api/media")
        .add_query_param("type", "images")
        .await
        .json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["media"][0]["name"], "a.png");

    let body: Value = client
        .get("/api/media")
        .add_query_param("type", "videos")
        .await
        .json();
    assert_eq!(body["count"], 1);

    let body: Value = client.get("/api/media").await.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["types"]["images"], 1);
    assert_eq!(body["types"]["videos"], 1);

    // Unknown filter matches nothing
    let body: Value = client
        .get("/api/media")
        .add_query_param("type", "documents")
        .await
        .json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_delete_validates_media_type_segment() {
    let app = setup_default_app();
    let client = app.client();

    let response = client.delete("/api/media/docs/a.png").await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Invalid media type. Must be \"images\" or \"videos\""
    );
}

#[tokio::test]
async fn test_delete_rejects_traversal() {
    let app = setup_default_app();

    let response = app.client().delete("/api/media/images/..%2Fpic.png").await;
    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid file path");
}

#[tokio::test]
async fn test_delete_unknown_media_is_404() {
    let app = setup_default_app();

    let response = app.client().delete("/api/media/images/missing.png").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_upload_urls_use_configured_base() {
    let app = setup_test_app(|config| {
        config.public_base_url = Some("https://cdn.example.com".to_string());
    });
    let client = app.client();

    let response = client
        .post("/api/media/upload")
        .multipart(file_form("pic.png", b"png".to_vec()))
        .await;
    let body: Value = response.json();
    assert_eq!(body["cdnUrl"], "https://cdn.example.com/images/pic.png");
    assert_eq!(body["viewUrl"], "https://cdn.example.com/media/view/pic.png");
}
