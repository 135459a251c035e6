//! Configuration module
//!
//! Environment-driven configuration for the API, loaded once at startup.
//! Validation happens in `from_env` so a misconfigured process fails fast
//! instead of serving requests with a broken storage root or auth secret.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_STORAGE_ROOT: &str = "/uploads";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    jwt_secret: String,
    storage_root: PathBuf,
    max_upload_bytes: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let jwt_secret = env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("ACCESS_TOKEN_SECRET must be set for authentication"))?;

        let storage_root = env::var("STORAGE_ROOT")
            .unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string())
            .into();

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let allowed_extensions: Vec<String> = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "jpg,jpeg,png,gif".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let allowed_content_types: Vec<String> = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png,image/gif".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        if allowed_extensions.iter().any(|e| e.is_empty()) {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS contains an empty entry"));
        }
        if max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES must be greater than zero"));
        }

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            jwt_secret,
            storage_root,
            max_upload_bytes,
            allowed_extensions,
            allowed_content_types,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn storage_root(&self) -> &std::path::Path {
        &self.storage_root
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    /// Build a config directly, bypassing the environment. Used by tests and
    /// embedding callers that already hold the values.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        server_port: u16,
        environment: impl Into<String>,
        cors_origins: Vec<String>,
        jwt_secret: impl Into<String>,
        storage_root: impl Into<PathBuf>,
        max_upload_bytes: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Config {
            server_port,
            environment: environment.into(),
            cors_origins,
            jwt_secret: jwt_secret.into(),
            storage_root: storage_root.into(),
            max_upload_bytes,
            allowed_extensions,
            allowed_content_types,
        }
    }
}
