//! Create-category routes

pub mod api;
pub mod page;

pub use api::{htmx_category_name, htmx_category_submit};
pub use page::page_new_category;
