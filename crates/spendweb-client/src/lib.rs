//! HTTP client for the expense-tracking API
//!
//! - client: base URL, JSON requests, envelope normalization
//! - services: category and payment-history operations
//! - models: envelope and entity wire types

pub mod client;
pub mod error;
pub mod models;
pub mod services;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use models::{AddPaymentRequest, ApiResponse, Category, CreateCategoryRequest, PaymentRecord};
pub use services::{CategoryApi, CategoryService, TransactionApi, TransactionService};
