//! Add-transaction HTMX endpoints
//!
//! - htmx_payment_categories: one-shot category load, returns the selector
//! - htmx_payment_category / amount / notes: field edits
//! - htmx_payment_submit: validate, call the service, apply the outcome

use axum::extract::{Path, State};
use axum::response::Html;
use spendweb_core::{AddPaymentForm, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};
use spendweb_utils::parse_form_body;
use uuid::Uuid;

use super::page::{render_amount_input, render_category_select, render_payment_controls, render_payment_form};
use crate::error::ApiResult;
use crate::routes::{parse_view_id, view_gone};
use crate::AppState;

fn with_form<R>(state: &AppState, view_id: &Uuid, f: impl FnOnce(&mut AddPaymentForm) -> R) -> ApiResult<R> {
    state.views.with_payment(view_id, f).ok_or_else(|| view_gone(view_id))
}

/// HTMX: category selector - triggers the load on first request
pub async fn htmx_payment_categories(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;

    if with_form(&state, &view_id, |form| form.begin_category_load())? {
        let result = state.categories.get_categories().await;
        with_form(&state, &view_id, |form| form.finish_category_load(result))?;
    }

    with_form(&state, &view_id, |form| {
        // Messages travel out of band so a load failure shows under the form
        format!(
            "{}{}",
            render_category_select(&view_id, form),
            render_payment_controls(&view_id, form, true)
        )
    })
    .map(Html)
}

/// HTMX: category selected - returns the controls fragment
pub async fn htmx_payment_category(
    State(state): State<AppState>,
    Path(view): Path<String>,
    body: String,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;
    let params = parse_form_body(&body);
    let raw = params.get("category_id").map(String::as_str).unwrap_or_default();

    with_form(&state, &view_id, |form| {
        form.select_category(raw);
        render_payment_controls(&view_id, form, false)
    })
    .map(Html)
}

/// HTMX: amount edited - returns the controls fragment, plus the input
/// out of band when the edit was dropped
pub async fn htmx_payment_amount(
    State(state): State<AppState>,
    Path(view): Path<String>,
    body: String,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;
    let params = parse_form_body(&body);
    let raw = params.get("amount").map(String::as_str).unwrap_or_default();
    let currency = &state.config.currency;

    with_form(&state, &view_id, |form| {
        let stored = form.set_amount(raw);
        let mut html = render_payment_controls(&view_id, form, false);
        if !stored {
            log::debug!("Dropped amount edit {:?} on view {}", raw, view_id);
            html.push_str(&render_amount_input(&view_id, form, currency, true));
        }
        html
    })
    .map(Html)
}

/// HTMX: notes edited - returns the controls fragment
pub async fn htmx_payment_notes(
    State(state): State<AppState>,
    Path(view): Path<String>,
    body: String,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;
    let params = parse_form_body(&body);
    let notes = params.get("notes").map(String::as_str).unwrap_or_default();

    with_form(&state, &view_id, |form| {
        form.set_notes(notes);
        render_payment_controls(&view_id, form, false)
    })
    .map(Html)
}

/// HTMX: submit - returns the whole form
pub async fn htmx_payment_submit(
    State(state): State<AppState>,
    Path(view): Path<String>,
    body: String,
) -> ApiResult<Html<String>> {
    let view_id = parse_view_id(&view)?;
    let params = parse_form_body(&body);
    let currency = &state.config.currency;

    let started = with_form(&state, &view_id, |form| {
        if let Some(raw) = params.get("category_id") {
            form.select_category(raw);
        }
        if let Some(raw) = params.get("amount") {
            form.set_amount(raw);
        }
        if let Some(notes) = params.get("notes") {
            form.set_notes(notes);
        }
        form.begin_submit()
    })?;

    let submission = match started {
        Ok(submission) => submission,
        Err(e @ (CoreError::Validation { .. } | CoreError::SubmissionInFlight)) => {
            let context = ErrorContext::new("add_payment_history").with_view_id(view_id.to_string());
            DefaultErrorLogger.log_error(&e, &context);
            return with_form(&state, &view_id, |form| render_payment_form(&view_id, form, currency)).map(Html);
        }
        Err(e) => return Err(e.into()),
    };

    let result = state
        .payments
        .add_payment_history(submission.category_id, submission.amount, Some(&submission.notes))
        .await;

    state
        .views
        .with_payment(&view_id, |form| {
            form.finish_submit(result);
            render_payment_form(&view_id, form, currency)
        })
        .map(Html)
        .ok_or_else(|| {
            log::debug!("Dropping add-transaction result for unmounted view {}", view_id);
            view_gone(&view_id)
        })
}
