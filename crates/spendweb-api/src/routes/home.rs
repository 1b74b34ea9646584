//! Home, not-found and health endpoints

use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use spendweb_core::routes::{HOME, NEW_CATEGORY, NEW_PAYMENT};
use spendweb_core::Route;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Home page - links to the two forms
pub async fn home_page(headers: HeaderMap) -> Html<String> {
    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Expenses</h2></div>
        <div class='grid grid-cols-1 md:grid-cols-2 gap-4 max-w-2xl'>
            <a href='{}' class='block bg-white rounded-xl shadow-sm p-6 hover:bg-indigo-50'>
                <p class='text-lg font-semibold'>Create Category</p>
                <p class='text-sm text-gray-500'>Add a new grouping for your payments</p>
            </a>
            <a href='{}' class='block bg-white rounded-xl shadow-sm p-6 hover:bg-indigo-50'>
                <p class='text-lg font-semibold'>Add Transaction</p>
                <p class='text-sm text-gray-500'>Record a payment against a category</p>
            </a>
        </div>"#,
        NEW_CATEGORY, NEW_PAYMENT
    );
    Html(crate::page_response(&headers, Route::Home.title(), HOME, &inner_content))
}

/// Fallback for every unknown path
pub async fn not_found(headers: HeaderMap) -> impl IntoResponse {
    let inner_content = format!(
        r#"<div class='max-w-lg bg-white rounded-xl shadow-sm p-6'>
            <h2 class='text-2xl font-bold mb-2'>Page not found</h2>
            <p class='text-gray-600 mb-4'>There is nothing at this address.</p>
            <a href='{}' class='text-indigo-600 hover:underline'>Go home</a>
        </div>"#,
        HOME
    );
    (
        StatusCode::NOT_FOUND,
        Html(crate::page_response(&headers, Route::NotFound.title(), "", &inner_content)),
    )
}
