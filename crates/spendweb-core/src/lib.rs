//! Form flow, submission phases and application state

pub mod amount;
pub mod error;
pub mod forms;
pub mod guard;
pub mod phase;
pub mod routes;
pub mod store;

pub use amount::{accepts, parse_amount, positive_amount, AmountInput};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use forms::{AddPaymentForm, CategoryOption, CategoryOptions, CreateCategoryForm};
pub use guard::{guard_from_config, login_redirect, GuardContext, RouteGuard};
pub use phase::{Outcome, Phase, PhaseEvent};
pub use routes::Route;
pub use store::{Slice, Store};
