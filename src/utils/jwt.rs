// src/utils/jwt.rs
//
// Bearer tokens for the admin API. Only staff accounts ever sign in, so the
// token carries the account id and its role and nothing else.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Role that may use `/api/admin`.
pub const ADMIN_ROLE: &str = "admin";

/// `iss` claim of every token this site signs.
pub const ISSUER: &str = "little-learners";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Id of the signed-in account.
    pub sub: i64,
    pub role: String,
    pub iss: String,
    /// Issued-at and expiry, Unix seconds.
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(account_id: i64, role: &str, lifetime_seconds: u64) -> Self {
        let issued = Utc::now();
        let expires = i64::try_from(lifetime_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            sub: account_id,
            role: role.to_owned(),
            iss: ISSUER.to_owned(),
            iat: issued.timestamp(),
            exp: expires.timestamp(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Signs a token for a staff account, valid for `lifetime_seconds`.
pub fn sign_jwt(
    account_id: i64,
    role: &str,
    secret: &str,
    lifetime_seconds: u64,
) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        &Claims::new(account_id, role, lifetime_seconds),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Decodes a token, rejecting bad signatures, other issuers and expired tokens.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Rejected admin token: {}", e);
            AppError::AuthError("Invalid token".to_string())
        })
}

/// Token of an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Verifies the bearer token and stores its `Claims` in the request
/// extensions. Missing or invalid tokens get a 401.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or(AppError::AuthError("Missing bearer token".to_string()))?;
    let claims = verify_jwt(token, &config.jwt_secret)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Runs after `auth_middleware`; anything but the admin role gets a 403.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(AppError::AuthError("Missing bearer token".to_string()))?;

    if !claims.is_admin() {
        tracing::warn!("Account {} with role '{}' tried the admin API", claims.sub, claims.role);
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn signed_token_verifies_with_same_secret() {
        let token = sign_jwt(7, ADMIN_ROLE, "s3cret", 60).unwrap();
        let claims = verify_jwt(&token, "s3cret").unwrap();
        assert_eq!(claims.sub, 7);
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 60);
        assert!(verify_jwt(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new(7, ADMIN_ROLE, 60);
        claims.exp = claims.iat - 10;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap();
        assert!(verify_jwt(&token, "s3cret").is_err());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let mut claims = Claims::new(7, ADMIN_ROLE, 60);
        claims.iss = "someone-else".to_string();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap();
        assert!(verify_jwt(&token, "s3cret").is_err());
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
