use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{config::AppConfig, errors::AppError};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Proof that the request carried the configured admin token. Handlers take
/// this as an argument; extraction fails with 401 before any data access.
pub struct AdminToken;

impl<S> FromRequestParts<S> for AdminToken
where
    AppConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let token = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        if token != config.admin_token {
            return Err(AppError::Unauthorized);
        }
        Ok(AdminToken)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(header: Option<&str>) -> Result<AdminToken, AppError> {
        let mut builder = Request::builder().uri("/players");
        if let Some(token) = header {
            builder = builder.header(ADMIN_TOKEN_HEADER, token);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AdminToken::from_request_parts(&mut parts, &AppConfig::for_tests()).await
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn wrong_token_is_unauthorized() {
        assert!(matches!(
            extract(Some("nope")).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn matching_token_passes() {
        assert!(extract(Some("test-admin-token")).await.is_ok());
    }
}
