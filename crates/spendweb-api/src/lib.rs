//! HTTP server with HTMX form pages
//!
//! Routes are organized into modules:
//! - routes::category: create-category page and fragments
//! - routes::payment: add-transaction page and fragments
//! - routes::home: home, not-found, health
//! - routes::views: view lifecycle
//!
//! Each form page mounts a view in [`ViewRegistry`]; its HTMX requests
//! address that view by id.

pub mod auth;
pub mod error;
pub mod routes;
pub mod views;

use std::future::Future;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use spendweb_client::{CategoryApi, TransactionApi};
use spendweb_config::Config;
use spendweb_core::routes::{HOME, NEW_CATEGORY, NEW_PAYMENT};
use spendweb_core::{guard_from_config, Route, RouteGuard, Store};
use tokio::net::TcpListener;

pub use error::{ApiError, ApiResult};
pub use views::{FormView, ViewRegistry};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub views: Arc<ViewRegistry>,
    pub categories: Arc<dyn CategoryApi>,
    pub payments: Arc<dyn TransactionApi>,
    pub guard: Arc<dyn RouteGuard>,
    pub store: Arc<Store>,
}

impl AppState {
    /// State with a fresh view registry and the configured guard
    pub fn new(
        config: Config,
        categories: Arc<dyn CategoryApi>,
        payments: Arc<dyn TransactionApi>,
        store: Arc<Store>,
    ) -> Self {
        Self {
            views: Arc::new(ViewRegistry::new(config.server.max_views)),
            guard: guard_from_config(&config.auth),
            config: Arc::new(config),
            categories,
            payments,
            store,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::category::{htmx_category_name, htmx_category_submit, page_new_category};
    use routes::home::{health_check, home_page, not_found};
    use routes::payment::{
        htmx_payment_amount, htmx_payment_categories, htmx_payment_category, htmx_payment_notes,
        htmx_payment_submit, page_new_payment,
    };
    use routes::views::close_view;

    let forms = Router::new()
        .route(NEW_CATEGORY, get(page_new_category))
        .route("/category/new/:view/name", post(htmx_category_name))
        .route("/category/new/:view/submit", post(htmx_category_submit))
        .route(NEW_PAYMENT, get(page_new_payment))
        .route("/payment/new/:view/categories", get(htmx_payment_categories))
        .route("/payment/new/:view/category", post(htmx_payment_category))
        .route("/payment/new/:view/amount", post(htmx_payment_amount))
        .route("/payment/new/:view/notes", post(htmx_payment_notes))
        .route("/payment/new/:view/submit", post(htmx_payment_submit))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_authorized));

    Router::new()
        .route("/api/health", get(health_check))
        .route(HOME, get(home_page))
        .route("/views/:view/close", post(close_view))
        .merge(forms)
        .fallback(not_found)
        .with_state(state)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Spendweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        spendweb_utils::escape_html(title),
        content
    )
}

/// Top navigation bar
pub fn nav_bar(current_path: &str) -> String {
    let links = [Route::Home, Route::NewCategory, Route::NewPayment];
    let current = Route::resolve(current_path);

    let mut nav = String::from(
        "<nav class='bg-white border-b'><div class='max-w-4xl mx-auto px-4 flex items-center gap-6 h-14'><span class='text-xl font-bold text-indigo-600'>Spendweb</span><ul class='flex gap-2'>",
    );
    for route in links {
        let Some(path) = route.path() else { continue };
        let active_class = if route == current { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            "<li><a href='{}' class='px-3 py-2 rounded-lg {}'>{}</a></li>",
            path, active_class, route.title()
        ));
    }
    nav.push_str("</ul></div></nav>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='max-w-4xl mx-auto p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!("{}<main class='max-w-4xl mx-auto p-6'>{}</main>", nav_bar(current_path), inner_content),
        )
    }
}

/// Start the HTTP server
///
/// Serves until `shutdown` resolves, then lets in-flight requests finish.
pub async fn start_server<F>(state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.bind_address();
    log::debug!("Store slices at startup: {:?}", state.store.slice_names());
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Spendweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - {} (Home)", HOME);
    log::info!("  - {} (Create category)", NEW_CATEGORY);
    log::info!("  - {} (Add transaction)", NEW_PAYMENT);
    log::info!("  - /api/health");

    axum::serve(listener, router).with_graceful_shutdown(shutdown).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
