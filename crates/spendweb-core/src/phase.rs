//! Submission phase of a form view.
//!
//! A view is always in exactly one of four phases, so an error message and
//! a success message can never be shown together.

use spendweb_client::{ApiResponse, ClientResult};

/// Shown when a transport failure carries no message of its own
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

/// Inputs to [`Phase::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A request was issued
    Started,
    /// The in-flight request resolved successfully
    Succeeded(String),
    /// The in-flight request resolved with a failure
    Failed(String),
    /// Failure raised without a request (validation, background load)
    Rejected(String),
    /// The user changed a field
    Edited,
}

impl Phase {
    /// The transition function.
    ///
    /// Resolutions only land on `Pending`; rejections and edits never
    /// disturb `Pending`.
    pub fn apply(self, event: PhaseEvent) -> Phase {
        match (self, event) {
            (_, PhaseEvent::Started) => Phase::Pending,
            (Phase::Pending, PhaseEvent::Succeeded(message)) => Phase::Succeeded(message),
            (Phase::Pending, PhaseEvent::Failed(message)) => Phase::Failed(message),
            (stale, PhaseEvent::Succeeded(_)) | (stale, PhaseEvent::Failed(_)) => stale,
            (Phase::Pending, PhaseEvent::Rejected(_)) => Phase::Pending,
            (_, PhaseEvent::Rejected(message)) => Phase::Failed(message),
            (Phase::Pending, PhaseEvent::Edited) => Phase::Pending,
            (_, PhaseEvent::Edited) => Phase::Idle,
        }
    }

    /// In-place form of [`Phase::apply`]
    pub fn transition(&mut self, event: PhaseEvent) {
        *self = std::mem::take(self).apply(event);
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Pending)
    }

    /// Error message, if one should be shown
    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failed(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Success message, if one should be shown
    pub fn success(&self) -> Option<&str> {
        match self {
            Phase::Succeeded(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// How a service call ended, with the message the view should show
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// `success: true`
    Accepted { message: String, data: Option<T> },
    /// The server answered `success: false`
    Refused(String),
    /// No usable answer arrived
    Unreachable(String),
}

impl<T> Outcome<T> {
    /// Classify a service result.
    ///
    /// `fallback` replaces an empty server message on refusal. Transport
    /// failures show their own message when they have one; any other
    /// client error shows [`UNEXPECTED_ERROR`].
    pub fn from_result(result: ClientResult<ApiResponse<T>>, fallback: &str) -> Self {
        match result {
            Ok(resp) if resp.success => Outcome::Accepted { message: resp.message, data: resp.data },
            Ok(resp) if resp.message.is_empty() => Outcome::Refused(fallback.to_string()),
            Ok(resp) => Outcome::Refused(resp.message),
            Err(e) if e.is_transport() => {
                Outcome::Unreachable(e.user_message().unwrap_or_else(|| UNEXPECTED_ERROR.to_string()))
            }
            Err(e) => {
                log::warn!("Unusable answer from the expense API: {}", e);
                Outcome::Unreachable(UNEXPECTED_ERROR.to_string())
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// The phase event this outcome produces
    pub fn event(&self) -> PhaseEvent {
        match self {
            Outcome::Accepted { message, .. } => PhaseEvent::Succeeded(message.clone()),
            Outcome::Refused(message) | Outcome::Unreachable(message) => PhaseEvent::Failed(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendweb_client::ClientError;

    fn all_phases() -> Vec<Phase> {
        vec![
            Phase::Idle,
            Phase::Pending,
            Phase::Succeeded("ok".to_string()),
            Phase::Failed("bad".to_string()),
        ]
    }

    fn all_events() -> Vec<PhaseEvent> {
        vec![
            PhaseEvent::Started,
            PhaseEvent::Succeeded("done".to_string()),
            PhaseEvent::Failed("nope".to_string()),
            PhaseEvent::Rejected("invalid".to_string()),
            PhaseEvent::Edited,
        ]
    }

    #[test]
    fn test_happy_path() {
        let phase = Phase::Idle
            .apply(PhaseEvent::Started)
            .apply(PhaseEvent::Succeeded("Category created".to_string()));
        assert_eq!(phase.success(), Some("Category created"));
        assert_eq!(phase.apply(PhaseEvent::Edited), Phase::Idle);
    }

    #[test]
    fn test_never_both_messages() {
        for phase in all_phases() {
            for event in all_events() {
                let next = phase.clone().apply(event);
                assert!(!(next.error().is_some() && next.success().is_some()));
            }
        }
    }

    #[test]
    fn test_pending_ignores_edits_and_rejections() {
        assert_eq!(Phase::Pending.apply(PhaseEvent::Edited), Phase::Pending);
        assert_eq!(Phase::Pending.apply(PhaseEvent::Rejected("x".to_string())), Phase::Pending);
    }

    #[test]
    fn test_stale_resolution_is_ignored() {
        let failed = Phase::Failed("old".to_string());
        assert_eq!(failed.clone().apply(PhaseEvent::Succeeded("late".to_string())), failed);
        assert_eq!(Phase::Idle.apply(PhaseEvent::Failed("late".to_string())), Phase::Idle);
    }

    #[test]
    fn test_edit_clears_any_message() {
        for phase in all_phases().into_iter().filter(|p| !p.is_pending()) {
            let next = phase.apply(PhaseEvent::Edited);
            assert_eq!(next, Phase::Idle);
        }
    }

    #[test]
    fn test_outcome_uses_fallback_for_empty_message() {
        let outcome: Outcome<()> = Outcome::from_result(Ok(ApiResponse::failure("")), "Failed to create category");
        assert_eq!(outcome, Outcome::Refused("Failed to create category".to_string()));

        let outcome: Outcome<()> = Outcome::from_result(Ok(ApiResponse::failure("Duplicate")), "Failed to create category");
        assert_eq!(outcome.event(), PhaseEvent::Failed("Duplicate".to_string()));
    }

    #[test]
    fn test_outcome_transport_messages() {
        let err = ClientError::Network { message: "connection refused".to_string() };
        let outcome: Outcome<()> = Outcome::from_result(Err(err), "unused");
        assert_eq!(outcome, Outcome::Unreachable("connection refused".to_string()));

        let err = ClientError::Network { message: String::new() };
        let outcome: Outcome<()> = Outcome::from_result(Err(err), "unused");
        assert_eq!(outcome, Outcome::Unreachable(UNEXPECTED_ERROR.to_string()));

        let err = ClientError::Decode { status: 200, message: "expected value at line 1".to_string() };
        let outcome: Outcome<()> = Outcome::from_result(Err(err), "unused");
        assert_eq!(outcome, Outcome::Unreachable(UNEXPECTED_ERROR.to_string()));
    }
}
