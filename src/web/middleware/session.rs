//! Session cookie extractor.

use axum::http::request::Parts;
use axum::extract::FromRequestParts;
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::web::error::WebError;
use crate::web::state::AppState;

/// Username of the caller's valid session.
///
/// Use this extractor to gate a handler on login; requests without a valid
/// session cookie are redirected to the login page.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Username bound to the session.
    pub username: String,
    /// The session token from the cookie.
    pub token: String,
}

impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = WebError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let token = jar
                .get(&state.cookie_name)
                .map(|c| c.value().to_string())
                .ok_or_else(WebError::unauthenticated)?;

            let username = state
                .sessions
                .lock()
                .await
                .require_session(&token)
                .map_err(|_| {
                    tracing::debug!("Rejected request with invalid or expired session");
                    WebError::unauthenticated()
                })?;

            Ok(SessionUser { username, token })
        })
    }
}
