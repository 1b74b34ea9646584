//! View lifecycle endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::ApiResult;
use crate::routes::parse_view_id;
use crate::AppState;

/// Unmount a view; sent as a beacon when the page is left
pub async fn close_view(State(state): State<AppState>, Path(view): Path<String>) -> ApiResult<StatusCode> {
    let view_id = parse_view_id(&view)?;
    if state.views.close(&view_id) {
        log::debug!("Closed view {} ({} mounted)", view_id, state.views.len());
    }
    Ok(StatusCode::NO_CONTENT)
}
