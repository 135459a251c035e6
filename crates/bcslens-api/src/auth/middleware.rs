//! Bearer-token verification middleware.
//!
//! Token issuance lives in the account service; this middleware only verifies
//! the HS256 signature, checks expiry, and gates on role before injecting a
//! [`PrincipalContext`] into request extensions. Handlers downstream can rely
//! on the context being present.

use crate::auth::models::{JwtClaims, PrincipalContext, UserRole};
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bcslens_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;

pub struct AuthState {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthState {
    pub fn new(jwt_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        AuthState {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    fn verify(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Access denied. No token provided.".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match auth_state.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Token verification failed");
            return HttpAppError(AppError::Forbidden("Invalid token.".to_string()))
                .into_response();
        }
    };

    let role = match UserRole::from_claim(&claims.role) {
        Some(role) => role,
        None => {
            tracing::debug!(role = %claims.role, user_id = %claims.sub, "Role not permitted");
            return HttpAppError(AppError::Forbidden(
                "Access denied. Insufficient role.".to_string(),
            ))
            .into_response();
        }
    };

    request.extensions_mut().insert(PrincipalContext {
        principal_id: claims.sub,
        role,
    });

    next.run(request).await
}
