//! Per-request context.

use crate::auth::Principal;
use uuid::Uuid;

/// Request context for content operations.
///
/// Provides request tracking for logging and, once authenticated, the caller.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
    pub principal: Option<Principal>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
        }
    }

    /// Context with a generated request id.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Context for an authenticated caller with a generated request id.
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            ..Self::with_generated_id()
        }
    }

    /// Subject for log lines; `anonymous` when unauthenticated.
    pub fn subject(&self) -> &str {
        self.principal
            .as_ref()
            .map_or("anonymous", Principal::subject)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
