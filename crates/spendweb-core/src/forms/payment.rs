//! Add-transaction form
//!
//! Three fields (category, amount, notes) plus the category list the
//! selector is filled from. The list is fetched once per mounted view.

use rust_decimal::Decimal;
use spendweb_client::{ApiResponse, CategoryApi, ClientResult, PaymentRecord, TransactionApi, Category};
use spendweb_utils::truncate_chars;

use crate::amount::{accepts, positive_amount};
use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::phase::{Outcome, Phase, PhaseEvent};

/// Longest note the input holds
pub const NOTES_MAX_CHARS: usize = 200;

pub const NO_CATEGORY_ERROR: &str = "Please select a category";
pub const INVALID_AMOUNT_ERROR: &str = "Please enter a valid amount greater than 0";
pub const LOAD_FAILED_FALLBACK: &str = "Failed to load categories";
pub const ADD_FAILED_FALLBACK: &str = "Failed to add transaction";

/// One entry of the category selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategoryOption {
    fn from(category: &Category) -> Self {
        Self { id: category.id, name: category.name().to_string() }
    }
}

/// Where the selector's list is in its one-shot load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryOptions {
    #[default]
    NotRequested,
    Loading,
    Loaded(Vec<CategoryOption>),
}

/// Request payload produced by a successful [`AddPaymentForm::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSubmission {
    pub category_id: i64,
    pub amount: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct AddPaymentForm {
    options: CategoryOptions,
    category_id: Option<i64>,
    amount: String,
    notes: String,
    phase: Phase,
}

impl AddPaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn options(&self) -> &CategoryOptions {
        &self.options
    }

    /// Mark the category load as started.
    ///
    /// Returns true only for the first call on this form; every later call
    /// must not issue another request.
    pub fn begin_category_load(&mut self) -> bool {
        if self.options != CategoryOptions::NotRequested {
            return false;
        }
        self.options = CategoryOptions::Loading;
        true
    }

    /// Store the result of the category load
    pub fn finish_category_load(&mut self, result: ClientResult<ApiResponse<Vec<Category>>>) {
        let failure = match result {
            Ok(ApiResponse { success: true, data: Some(categories), .. }) => {
                let options = categories.iter().map(CategoryOption::from).collect();
                self.options = CategoryOptions::Loaded(options);
                return;
            }
            Ok(resp) if !resp.success && !resp.message.is_empty() => resp.message,
            Ok(_) => LOAD_FAILED_FALLBACK.to_string(),
            Err(e) => {
                let context = ErrorContext::new("get_categories");
                DefaultErrorLogger.log_warning(&format!("Category load failed: {}", e), &context);
                LOAD_FAILED_FALLBACK.to_string()
            }
        };
        self.options = CategoryOptions::Loaded(vec![]);
        self.phase.transition(PhaseEvent::Rejected(failure));
    }

    pub fn is_loading_categories(&self) -> bool {
        matches!(self.options, CategoryOptions::Loading)
    }

    /// Loaded categories, in server order
    pub fn categories(&self) -> &[CategoryOption] {
        match &self.options {
            CategoryOptions::Loaded(options) => options,
            _ => &[],
        }
    }

    /// Selector is disabled once loaded with nothing to pick
    pub fn selector_disabled(&self) -> bool {
        matches!(&self.options, CategoryOptions::Loaded(options) if options.is_empty())
    }

    /// Select by the selector's raw value; unknown ids leave nothing selected
    pub fn select_category(&mut self, raw: &str) {
        self.category_id = raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| self.categories().iter().any(|option| option.id == *id));
        self.phase.transition(PhaseEvent::Edited);
    }

    /// Apply an amount edit.
    ///
    /// Text the amount pattern rejects is dropped and the stored value kept.
    /// Returns whether the edit was stored.
    pub fn set_amount(&mut self, raw: &str) -> bool {
        let stored = accepts(raw);
        if stored {
            self.amount = raw.to_string();
        }
        self.phase.transition(PhaseEvent::Edited);
        stored
    }

    pub fn set_notes(&mut self, value: &str) {
        self.notes = truncate_chars(value, NOTES_MAX_CHARS);
        self.phase.transition(PhaseEvent::Edited);
    }

    /// Whether the submit control is enabled: a loaded category is
    /// selected, the amount is positive and nothing is in flight
    pub fn can_submit(&self) -> bool {
        self.category_id.is_some() && positive_amount(&self.amount).is_some() && !self.phase.is_pending()
    }

    /// Validate and enter the pending phase.
    ///
    /// # Errors
    ///
    /// `SubmissionInFlight` while a request is pending; `Validation` for a
    /// missing category or a non-positive amount, shown on the form.
    pub fn begin_submit(&mut self) -> CoreResult<PaymentSubmission> {
        if self.phase.is_pending() {
            return Err(CoreError::SubmissionInFlight);
        }

        let Some(category_id) = self.category_id else {
            return Err(self.reject(NO_CATEGORY_ERROR));
        };
        let Some(amount) = positive_amount(&self.amount) else {
            return Err(self.reject(INVALID_AMOUNT_ERROR));
        };

        self.phase.transition(PhaseEvent::Started);
        Ok(PaymentSubmission { category_id, amount, notes: self.notes.trim().to_string() })
    }

    /// Apply the service result of a submission.
    ///
    /// Returns false when no submission was pending.
    pub fn finish_submit(&mut self, result: ClientResult<ApiResponse<PaymentRecord>>) -> bool {
        if !self.phase.is_pending() {
            return false;
        }
        let outcome = Outcome::from_result(result, ADD_FAILED_FALLBACK);
        if outcome.is_accepted() {
            self.category_id = None;
            self.amount.clear();
            self.notes.clear();
        }
        self.phase.transition(outcome.event());
        true
    }

    /// One-shot category load against `api`; later calls do nothing
    pub async fn load_categories(&mut self, api: &dyn CategoryApi) {
        if self.begin_category_load() {
            let result = api.get_categories().await;
            self.finish_category_load(result);
        }
    }

    /// Full submission against `api`
    pub async fn submit(&mut self, api: &dyn TransactionApi) -> CoreResult<()> {
        let submission = self.begin_submit()?;
        let result = api
            .add_payment_history(submission.category_id, submission.amount, Some(&submission.notes))
            .await;
        self.finish_submit(result);
        Ok(())
    }

    fn reject(&mut self, message: &str) -> CoreError {
        self.phase.transition(PhaseEvent::Rejected(message.to_string()));
        CoreError::Validation { message: message.to_string() }
    }
}
