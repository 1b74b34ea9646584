//! Route guards.
//!
//! A guard decides whether a request may reach a form page. Which guard is
//! active comes from `auth.guard`; nothing is guarded unless `auth.enforce`.

use std::sync::Arc;

use spendweb_config::{AuthConfig, GuardKind};
use spendweb_utils::encode_component;

/// What a guard gets to look at
#[derive(Debug, Clone, Default)]
pub struct GuardContext {
    /// Requested path
    pub path: String,
    /// Session token from the configured cookie, if any
    pub session_token: Option<String>,
    /// Roles attached to the request
    pub roles: Vec<String>,
}

impl GuardContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}

pub trait RouteGuard: Send + Sync {
    fn is_authorized(&self, context: &GuardContext) -> bool;

    fn name(&self) -> &'static str;
}

/// Lets everything through
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAllow;

impl RouteGuard for AlwaysAllow {
    fn is_authorized(&self, _context: &GuardContext) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "always_allow"
    }
}

/// Requires a non-empty session token
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionTokenPresent;

impl RouteGuard for SessionTokenPresent {
    fn is_authorized(&self, context: &GuardContext) -> bool {
        context.session_token.as_deref().is_some_and(|token| !token.trim().is_empty())
    }

    fn name(&self) -> &'static str {
        "session_token"
    }
}

/// Requires at least one of `roles`
#[derive(Debug, Clone)]
pub struct RoleBased {
    pub roles: Vec<String>,
}

impl RouteGuard for RoleBased {
    fn is_authorized(&self, context: &GuardContext) -> bool {
        context.roles.iter().any(|role| self.roles.contains(role))
    }

    fn name(&self) -> &'static str {
        "role_based"
    }
}

/// Build the configured guard
pub fn guard_from_config(auth: &AuthConfig) -> Arc<dyn RouteGuard> {
    let guard: Arc<dyn RouteGuard> = match auth.guard {
        GuardKind::AlwaysAllow => Arc::new(AlwaysAllow),
        GuardKind::SessionToken => Arc::new(SessionTokenPresent),
        GuardKind::RoleBased => Arc::new(RoleBased { roles: auth.roles.clone() }),
    };
    log::debug!("Route guard: {} (enforced: {})", guard.name(), auth.enforce);
    guard
}

/// Redirect target for a request to `from` that failed its guard
pub fn login_redirect(login_path: &str, from: &str) -> String {
    format!("{}?from={}", login_path, encode_component(from))
}
