use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// User role for authorization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Expert,
    PetOwner,
}

impl UserRole {
    /// Parse the role claim carried in a token. Unknown roles yield `None`;
    /// the middleware treats those as insufficient.
    pub fn from_claim(role: &str) -> Option<Self> {
        match role {
            "expert" => Some(UserRole::Expert),
            "pet-owner" => Some(UserRole::PetOwner),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UserRole::Expert => write!(f, "expert"),
            UserRole::PetOwner => write!(f, "pet-owner"),
        }
    }
}

/// JWT claims structure
///
/// Tokens are issued by the account service; this API only verifies them.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,    // user id
    pub role: String, // "expert" or "pet-owner"
    pub exp: i64,     // expiration timestamp
    pub iat: i64,     // issued at timestamp
}

/// Verified principal extracted from the JWT and stored in request extensions
#[derive(Debug, Clone)]
pub struct PrincipalContext {
    pub principal_id: Uuid,
    pub role: UserRole,
}

// Implement FromRequestParts for PrincipalContext to work with Multipart
// Extension cannot be used with Multipart, so we extract directly from request parts
impl<S> FromRequestParts<S> for PrincipalContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PrincipalContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing principal context".to_string(),
                        details: None,
                        error_type: None,
                        code: "MISSING_PRINCIPAL_CONTEXT".to_string(),
                        recoverable: false,
                        suggested_action: Some("Check authentication token".to_string()),
                    }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::from_claim("expert"), Some(UserRole::Expert));
        assert_eq!(UserRole::from_claim("pet-owner"), Some(UserRole::PetOwner));
        assert_eq!(UserRole::from_claim("admin"), None);
        assert_eq!(UserRole::from_claim(""), None);
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in [UserRole::Expert, UserRole::PetOwner] {
            assert_eq!(UserRole::from_claim(&role.to_string()), Some(role));
        }
    }
}
