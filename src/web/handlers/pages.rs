//! Built-in pages.

use axum::response::{Html, Redirect};

use crate::web::render;
use crate::web::LOGIN_PAGE;

/// GET / - send visitors to the login page.
pub async fn index() -> Redirect {
    Redirect::to(LOGIN_PAGE)
}

/// GET /login.html
pub async fn login_page() -> Html<String> {
    Html(render::login_page())
}

/// GET /register.html
pub async fn register_page() -> Html<String> {
    Html(render::register_page())
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
