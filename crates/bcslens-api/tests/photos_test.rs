mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::test_user;
use helpers::fixtures::{jpeg_bytes, jpeg_bytes_of_size, png_bytes, png_bytes_of_size};
use helpers::{api_path, setup_test_app};

fn photo_form(data: Vec<u8>, filename: &str, content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data)
            .file_name(filename)
            .mime_type(content_type),
    )
}

fn assert_identifier_format(filename: &str, expected_ext: &str) {
    let (stem, ext) = filename
        .split_once('.')
        .unwrap_or_else(|| panic!("identifier has no extension: {}", filename));
    assert_eq!(ext, expected_ext);
    assert_eq!(stem.len(), 32);
    assert!(
        stem.chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
        "identifier stem is not lowercase hex: {}",
        stem
    );
}

#[tokio::test]
async fn test_health_is_public() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_upload_photo_success() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(png_bytes(), "bella-side.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "File uploaded!");
    let filename = body["filename"].as_str().unwrap();
    assert_identifier_format(filename, "png");
    assert_ne!(filename, "bella-side.png");
    assert_eq!(app.stored_file_count(), 1);
}

#[tokio::test]
async fn test_upload_rejects_oversize_png() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(
            png_bytes_of_size(6 * 1024 * 1024),
            "big.png",
            "image/png",
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "File too large (max 5MB)");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_spoofed_png() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    // JPEG bytes, but the client claims PNG in both name and Content-Type
    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(jpeg_bytes(), "photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CONTENT_MISMATCH");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_undetectable_content() {
    let app = setup_test_app().await;
    let user = test_user("expert");

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(
            b"#!/bin/sh\necho pwned".to_vec(),
            "script.png",
            "image/png",
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CONTENT_MISMATCH");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_missing_file() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No file uploaded.");
}

#[tokio::test]
async fn test_upload_rejects_multiple_files() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(png_bytes())
                .file_name("one.png")
                .mime_type("image/png"),
        )
        .add_part(
            "file",
            Part::bytes(png_bytes())
                .file_name("two.png")
                .mime_type("image/png"),
        );

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(photo_form(png_bytes(), "pic.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", "Bearer not-a-real-token")
        .multipart(photo_form(png_bytes(), "pic.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_upload_rejects_unlisted_role() {
    let app = setup_test_app().await;
    let user = test_user("admin");

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(png_bytes(), "pic.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Access denied. Insufficient role.");
}

#[tokio::test]
async fn test_upload_then_retrieve_round_trip() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let original = jpeg_bytes_of_size(2 * 1024 * 1024);
    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(original.clone(), "rex.jpg", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let filename = body["filename"].as_str().unwrap().to_string();
    assert_identifier_format(&filename, "jpg");
    assert_eq!(filename.len(), 36);

    // First retrieval
    let response = app
        .client()
        .get(&api_path(&format!("/photos/{}", filename)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/jpeg");
    let first = response.as_bytes().to_vec();
    assert_eq!(first, original);

    // Second retrieval is byte-identical
    let response = app
        .client()
        .get(&api_path(&format!("/photos/{}", filename)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().to_vec(), first);
}

#[tokio::test]
async fn test_retrieve_jpg_alias_declared_upload() {
    let app = setup_test_app().await;
    let user = test_user("expert");

    // "image/jpg" is accepted as an alias of image/jpeg
    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(photo_form(jpeg_bytes(), "scan.jpeg", "image/jpg"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_identifier_format(body["filename"].as_str().unwrap(), "jpeg");
}

#[tokio::test]
async fn test_retrieve_traversal_is_rejected() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    // URL-encoded "../../etc/passwd" reaches the handler as one path segment
    let response = app
        .client()
        .get(&api_path("/photos/..%2F..%2Fetc%2Fpasswd"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;

    assert_eq!(response.status_code(), 403);
    let body = response.text();
    assert!(!body.contains("root:"));

    // A bare parent-directory segment is rejected the same way
    let response = app
        .client()
        .get(&api_path("/photos/.."))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert!(
        response.status_code() == 403 || response.status_code() == 400,
        "unexpected status {}",
        response.status_code()
    );
}

#[tokio::test]
async fn test_retrieve_null_byte_is_rejected() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let response = app
        .client()
        .get(&api_path("/photos/0123456789abcdef0123456789abcdef.jpg%00.png"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_retrieve_arbitrary_name_is_invalid_format() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let response = app
        .client()
        .get(&api_path("/photos/photo.png"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid filename format");
}

#[tokio::test]
async fn test_retrieve_absent_identifier_is_not_found() {
    let app = setup_test_app().await;
    let user = test_user("pet-owner");

    let response = app
        .client()
        .get(&api_path("/photos/0123456789abcdef0123456789abcdef.gif"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_retrieve_by_non_owner_is_forbidden() {
    let app = setup_test_app().await;
    let owner = test_user("pet-owner");
    let other = test_user("pet-owner");

    let response = app
        .client()
        .post(&api_path("/photos"))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .multipart(photo_form(png_bytes(), "private.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let filename = body["filename"].as_str().unwrap().to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/photos/{}", filename)))
        .add_header("Authorization", format!("Bearer {}", other.token))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Unauthorized");

    // The owner still has access
    let response = app
        .client()
        .get(&api_path(&format!("/photos/{}", filename)))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_retrieval_requires_token() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/photos/0123456789abcdef0123456789abcdef.jpg"))
        .await;

    assert_eq!(response.status_code(), 401);
}
