//! Registration, login and logout handlers.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::hash_password;
use crate::auth::validation::validate_registration;
use crate::web::error::WebError;
use crate::web::state::AppState;
use crate::web::{DASHBOARD_PAGE, LOGIN_PAGE};
use crate::DevDropError;

/// Username/password form used by both register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Raw password.
    #[serde(default)]
    pub password: String,
}

/// POST /register - create an account and send the user to the login page.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, WebError> {
    validate_registration(&form.username, &form.password).map_err(DevDropError::from)?;

    // Hash outside the lock
    let password_hash =
        hash_password(&form.password).map_err(|e| DevDropError::Password(e.to_string()))?;

    state
        .credentials
        .lock()
        .await
        .register_hashed(&form.username, password_hash)?;

    Ok(Redirect::to(LOGIN_PAGE).into_response())
}

/// POST /login - verify credentials, start a session and set the cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let user = state.credentials.lock().await.lookup(&form.username)?;
    user.verify(&form.password)?;

    let (session, ttl) = {
        let mut sessions = state.sessions.lock().await;
        let session = sessions.login(&user.username);
        (session, sessions.duration().num_seconds())
    };

    let cookie = state.session_cookie(session.token, ttl);
    Ok((jar.add(cookie), Redirect::to(DASHBOARD_PAGE)))
}

/// GET /logout - destroy the session (if any) and clear the cookie.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(&state.cookie_name) {
        state.sessions.lock().await.logout(cookie.value());
    }

    (jar.remove(state.removal_cookie()), Redirect::to(LOGIN_PAGE))
}
