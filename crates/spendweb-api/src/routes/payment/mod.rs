//! Add-transaction routes

pub mod api;
pub mod page;

pub use api::{
    htmx_payment_amount, htmx_payment_categories, htmx_payment_category, htmx_payment_notes,
    htmx_payment_submit,
};
pub use page::page_new_payment;
