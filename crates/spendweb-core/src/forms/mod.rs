//! Form view state.
//!
//! Each form splits a submission into `begin_submit` (validate and enter
//! the pending phase) and `finish_submit` (apply the service result) so a
//! caller can release its locks while the request is in flight.

pub mod category;
pub mod payment;

pub use category::{CategorySubmission, CreateCategoryForm};
pub use payment::{AddPaymentForm, CategoryOption, CategoryOptions, PaymentSubmission};
