//! Caller identification for the API.
//!
//! Session tokens are issued elsewhere (the identity layer owns sign-in) and
//! arrive here as `Authorization: Bearer <token>`. The extractor resolves the
//! token against the sessions table and hands the handler an active account,
//! or rejects the request outright.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::Database;
use crate::error::ApiError;
use crate::models::user::UserRole;

/// The authenticated account behind the current request.
#[derive(Debug, Clone, FromRow)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_manager(&self) -> bool {
        self.role == UserRole::Manager
    }

    /// Gate for manager-only operations.
    pub fn require_manager(&self) -> Result<(), ApiError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Access denied."))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let db = Database::from_ref(state);

        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT u.id, u.name, u.email, u.role \
             FROM sessions s \
             JOIN users u ON u.id = s.user_id \
             WHERE s.session_token = $1 AND s.expires_at > NOW() AND u.is_active = TRUE",
        )
        .bind(token)
        .fetch_optional(&db)
        .await?
        .ok_or(ApiError::Unauthorized)?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn extracts_the_token_after_the_bearer_prefix() {
        assert_eq!(bearer_token(&headers_with("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers_with("Bearer   abc123  ")), Some("abc123"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with("Basic abc123")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("abc123")), None);
    }

    #[test]
    fn manager_gate_tracks_the_role() {
        let manager = CurrentUser {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: UserRole::Manager,
        };
        assert!(manager.require_manager().is_ok());

        let resident = CurrentUser {
            role: UserRole::Resident,
            ..manager
        };
        assert!(matches!(
            resident.require_manager(),
            Err(ApiError::Forbidden(_))
        ));
    }
}
