//! Route guard middleware for the form routes

use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use spendweb_core::{login_redirect, GuardContext};
use spendweb_utils::cookie_value;

use crate::error::ApiError;
use crate::AppState;

/// Build the guard's view of a request
pub fn guard_context(request: &Request, session_cookie: &str) -> GuardContext {
    let mut context = GuardContext::new(request.uri().path());
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, session_cookie));
    if let Some(token) = token {
        context = context.with_session_token(token);
    }
    context
}

/// Refuse requests the configured guard does not authorize.
///
/// Page loads are redirected to the login path; fragment requests get 401.
pub async fn require_authorized(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let auth = &state.config.auth;
    if !auth.enforce {
        return next.run(request).await;
    }

    let context = guard_context(&request, &auth.session_cookie);
    if state.guard.is_authorized(&context) {
        return next.run(request).await;
    }

    log::info!("Guard '{}' refused {} {}", state.guard.name(), request.method(), context.path);
    if request.method() == Method::GET {
        Redirect::to(&login_redirect(&auth.login_path, &context.path)).into_response()
    } else {
        ApiError::Unauthorized.into_response()
    }
}
