use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

use super::TEST_JWT_SECRET;

#[derive(Serialize)]
struct Claims {
    sub: Uuid,
    role: String,
    exp: i64,
    iat: i64,
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

/// Mint a token the way the account service would, signed with the shared
/// test secret.
pub fn test_user(role: &str) -> TestUser {
    let id = Uuid::new_v4();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id,
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token");

    TestUser { id, token }
}
