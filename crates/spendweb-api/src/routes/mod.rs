//! Route modules for the web server
//!
//! - category: create-category page and its HTMX endpoints
//! - payment: add-transaction page and its HTMX endpoints
//! - home: home, not-found and health
//! - views: view lifecycle (close beacon)
//!
//! Form modules follow the same layout:
//! - mod.rs: module declaration and exports
//! - page.rs: full page and fragment rendering
//! - api.rs: HTMX endpoints

pub mod category;
pub mod home;
pub mod payment;
pub mod views;

use spendweb_core::Phase;
use spendweb_utils::escape_html;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Parse the `{view}` path segment
pub(crate) fn parse_view_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest { message: format!("Malformed view id '{}'", raw) })
}

pub(crate) fn view_gone(view_id: &Uuid) -> ApiError {
    ApiError::ViewNotFound { view_id: view_id.to_string() }
}

/// Error or success line for a view; at most one is ever set
pub(crate) fn render_messages(phase: &Phase) -> String {
    if let Some(error) = phase.error() {
        format!(
            "<p class='mt-3 p-3 rounded-lg bg-red-50 text-red-700 border border-red-200' role='alert'>{}</p>",
            escape_html(error)
        )
    } else if let Some(success) = phase.success() {
        format!(
            "<p class='mt-3 p-3 rounded-lg bg-green-50 text-green-700 border border-green-200' role='status'>{}</p>",
            escape_html(success)
        )
    } else {
        String::new()
    }
}

/// Back navigation control
pub(crate) fn back_button() -> &'static str {
    "<button type='button' onclick='history.back()' class='mb-4 px-3 py-1.5 text-sm text-gray-600 border rounded-lg hover:bg-gray-100'>&larr; Back</button>"
}

/// Unmount the view when the page is discarded.
///
/// A page kept in the back-forward cache still owns its view.
pub(crate) fn close_on_unload(view_id: &Uuid) -> String {
    format!(
        "<script>window.addEventListener('pagehide', function(event) {{ if (!event.persisted) {{ navigator.sendBeacon('/views/{}/close'); }} }});</script>",
        view_id
    )
}
