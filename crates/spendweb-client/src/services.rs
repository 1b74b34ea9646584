//! Category and payment-history operations on top of [`ApiClient`]
//!
//! No validation happens here; callers validate before calling.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{AddPaymentRequest, ApiResponse, Category, CreateCategoryRequest, PaymentRecord};

pub const CREATE_CATEGORY_PATH: &str = "/api/v1/create-category";
pub const GET_CATEGORIES_PATH: &str = "/api/v1/get-categories";
pub const ADD_PAYMENT_HISTORY_PATH: &str = "/api/v1/add-payment-history";

/// Category endpoints
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// Create a category; on success the payload is the created category
    async fn create_category(&self, name: &str) -> ClientResult<ApiResponse<Category>>;

    /// List categories in the order the server returns them
    async fn get_categories(&self) -> ClientResult<ApiResponse<Vec<Category>>>;
}

/// Payment-history endpoints
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Record a payment; missing notes are sent as an empty string
    async fn add_payment_history(
        &self,
        category_id: i64,
        amount: Decimal,
        notes: Option<&str>,
    ) -> ClientResult<ApiResponse<PaymentRecord>>;
}

#[derive(Debug, Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryApi for CategoryService {
    async fn create_category(&self, name: &str) -> ClientResult<ApiResponse<Category>> {
        let body = CreateCategoryRequest { category: name.to_string() };
        self.client.post(CREATE_CATEGORY_PATH, &body).await
    }

    async fn get_categories(&self) -> ClientResult<ApiResponse<Vec<Category>>> {
        self.client.get(GET_CATEGORIES_PATH).await
    }
}

#[derive(Debug, Clone)]
pub struct TransactionService {
    client: ApiClient,
}

impl TransactionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionApi for TransactionService {
    async fn add_payment_history(
        &self,
        category_id: i64,
        amount: Decimal,
        notes: Option<&str>,
    ) -> ClientResult<ApiResponse<PaymentRecord>> {
        let body = AddPaymentRequest {
            category_id,
            amount,
            notes: notes.unwrap_or_default().to_string(),
        };
        self.client.post(ADD_PAYMENT_HISTORY_PATH, &body).await
    }
}
