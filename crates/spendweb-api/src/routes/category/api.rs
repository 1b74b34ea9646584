//! Create-category HTMX endpoints
//!
//! - htmx_category_name: apply a name edit
//! - htmx_category_submit: validate, call the service, apply the outcome

use axum::extract::{Path, State};
use axum::response::Html;
use spendweb_core::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};
use spendweb_utils::parse_form_body;

use super::page::{render_category_controls, render_category_form};
use crate::error::ApiResult;
use crate::routes::{parse_view_id, view_gone};
use crate::AppState;

/// HTMX: name edited - returns the controls fragment
pub async fn htmx_category_name(
    State(state): State<AppState>,
    Path(view): Path<String>,
    body: String,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;
    let params = parse_form_body(&body);
    let name = params.get("name").map(String::as_str).unwrap_or_default();

    state
        .views
        .with_category(&view_id, |form| {
            form.set_name(name);
            render_category_controls(&view_id, form)
        })
        .map(Html)
        .ok_or_else(|| view_gone(&view_id))
}

/// HTMX: submit - returns the whole form
pub async fn htmx_category_submit(
    State(state): State<AppState>,
    Path(view): Path<String>,
    body: String,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;
    let params = parse_form_body(&body);

    let started = state
        .views
        .with_category(&view_id, |form| {
            if let Some(name) = params.get("name") {
                form.set_name(name);
            }
            form.begin_submit()
        })
        .ok_or_else(|| view_gone(&view_id))?;

    let submission = match started {
        Ok(submission) => submission,
        Err(e @ (CoreError::Validation { .. } | CoreError::SubmissionInFlight)) => {
            let context = ErrorContext::new("create_category").with_view_id(view_id.to_string());
            DefaultErrorLogger.log_error(&e, &context);
            return state
                .views
                .with_category(&view_id, |form| render_category_form(&view_id, form))
                .map(Html)
                .ok_or_else(|| view_gone(&view_id));
        }
        Err(e) => return Err(e.into()),
    };

    let result = state.categories.create_category(&submission.name).await;

    state
        .views
        .with_category(&view_id, |form| {
            form.finish_submit(result);
            render_category_form(&view_id, form)
        })
        .map(Html)
        .ok_or_else(|| {
            log::debug!("Dropping create-category result for unmounted view {}", view_id);
            view_gone(&view_id)
        })
}
