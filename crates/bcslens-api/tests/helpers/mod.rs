pub mod auth;
pub mod fixtures;

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use bcslens_api::setup;
use bcslens_api::state::AppState;
use bcslens_core::constants::API_PREFIX;
use bcslens_core::Config;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "test-access-token-secret";

/// Returns the versioned API path.
/// Usage: `api_path("/photos")` -> `/api/v0/photos`.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Test application state
pub struct TestApp {
    pub server: TestServer,
    pub storage_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently in the storage root
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(&self.storage_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Setup a test application with an isolated storage directory
pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage_dir = temp_dir.path().to_path_buf();

    let config = Config::new(
        0,
        "test",
        vec!["*".to_string()],
        TEST_JWT_SECRET,
        storage_dir.clone(),
        5 * 1024 * 1024,
        vec!["jpg".into(), "jpeg".into(), "png".into(), "gif".into()],
        vec!["image/jpeg".into(), "image/png".into(), "image/gif".into()],
    );

    let storage = setup::storage::setup_storage(&config)
        .await
        .expect("Failed to initialize test storage");
    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = setup::routes::setup_routes(&config, state).expect("Failed to build routes");

    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        storage_dir,
        _temp_dir: temp_dir,
    }
}
