//! Wire types exchanged with the expense API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Uniform `{success, message, data?}` wrapper around every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }

    /// Failed envelope without payload
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

/// A named grouping that payments are recorded against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Display name
    pub category: String,
    /// Sent as `1`/`0` or `true`/`false`
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.category
    }
}

/// A single recorded payment tied to a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub category_id: i64,
    #[serde(default, deserialize_with = "lenient::option_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/v1/create-category`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub category: String,
}

/// Body of `POST /api/v1/add-payment-history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPaymentRequest {
    pub category_id: i64,
    pub amount: Decimal,
    pub notes: String,
}

mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Number;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagInput {
        Bool(bool),
        Int(i64),
        Null,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DecimalInput {
        String(String),
        Number(Number),
        Null,
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match FlagInput::deserialize(deserializer)? {
            FlagInput::Bool(value) => value,
            FlagInput::Int(value) => value != 0,
            FlagInput::Null => false,
        })
    }

    pub fn option_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match DecimalInput::deserialize(deserializer)? {
            DecimalInput::Null => return Ok(None),
            DecimalInput::String(s) if s.trim().is_empty() => return Ok(None),
            DecimalInput::String(s) => s.trim().to_string(),
            DecimalInput::Number(n) => n.to_string(),
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("Invalid decimal value '{}': {}", raw, e)))
    }
}
