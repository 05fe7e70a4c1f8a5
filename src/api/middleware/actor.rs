//! Actor resolution from bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::UserId;
use crate::domain::Actor;

/// Extractor yielding the actor behind a request
///
/// A request without an `Authorization` header is anonymous. A header that
/// is present but malformed, or a token that fails verification or names an
/// unknown user, rejects the request with 401.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_bearer_token(&parts.headers)? else {
            return Ok(CurrentActor(Actor::Anonymous));
        };

        let claims = state
            .jwt_service
            .validate(&token)
            .map_err(ApiError::from)?;

        let user_id = UserId::new(claims.user_id())
            .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;

        let user = state
            .user_storage
            .get(&user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?;

        debug!(user = %user.id(), "Resolved actor from bearer token");

        Ok(CurrentActor(Actor::User(user)))
    }
}

/// Extract the bearer token, `None` when no Authorization header is sent
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::unauthorized("Expected 'Authorization: Bearer <token>' header")
        })?;

    Ok(Some(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let token = extract_bearer_token(&headers("Bearer eyJhbGciOiJIUzI1NiJ9.test")).unwrap();
        assert_eq!(token.as_deref(), Some("eyJhbGciOiJIUzI1NiJ9.test"));
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        assert!(extract_bearer_token(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_other_scheme_is_rejected() {
        let err = extract_bearer_token(&headers("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(extract_bearer_token(&headers("Bearer    ")).is_err());
    }

    #[test]
    fn test_trimmed_token() {
        let token = extract_bearer_token(&headers("Bearer   token-with-spaces   ")).unwrap();
        assert_eq!(token.as_deref(), Some("token-with-spaces"));
    }
}
