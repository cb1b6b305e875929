//! Administrative action surface.
//!
//! One action is exposed: `reset_platform_capabilities`. A request carries a
//! single-use token issued to the admin session; dispatch validates the token
//! and the caller's `manage_platform` capability before any mutation, then
//! flattens the outcome into a JSON `{success, message}` envelope.

use std::collections::BTreeSet;

use tracing::warn;
use uuid::Uuid;

use crate::error::AccessError;
use crate::provider::builtin::caps;
use crate::reconciler::Reconciler;
use crate::registry::RoleRegistry;
use crate::types::{CapabilityName, RoleSlug};

/// Action name for the capability reset.
pub const RESET_ACTION: &str = "reset_platform_capabilities";

/// Single-use request token handed to the admin page when it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ActionToken(Uuid);

/// Issues and validates [`ActionToken`]s. Tokens are spent on first use, so a
/// replayed request fails validation.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    active: BTreeSet<Uuid>,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> ActionToken {
        let token = Uuid::new_v4();
        self.active.insert(token);
        ActionToken(token)
    }

    /// Consumes the token. Returns false for unknown or already-spent tokens.
    pub fn validate(&mut self, token: &ActionToken) -> bool {
        self.active.remove(&token.0)
    }
}

/// The acting user, reduced to the roles the host resolved for them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Caller {
    pub user: String,
    pub roles: Vec<RoleSlug>,
}

impl Caller {
    pub fn new(user: impl Into<String>, roles: Vec<RoleSlug>) -> Self {
        Caller {
            user: user.into(),
            roles,
        }
    }
}

/// Incoming admin request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub token: ActionToken,
}

/// Outgoing envelope. Always returned, success or not; errors never escape
/// the dispatcher as panics or raw `Err`s.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ActionResponse {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        ActionResponse {
            success: false,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, AccessError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Routes admin requests to the reconciler.
#[derive(Debug)]
pub struct AdminDispatcher {
    reconciler: Reconciler,
    tokens: TokenIssuer,
}

impl AdminDispatcher {
    pub fn new(reconciler: Reconciler) -> Self {
        AdminDispatcher {
            reconciler,
            tokens: TokenIssuer::new(),
        }
    }

    /// Token for the next request; called when the admin page renders.
    pub fn issue_token(&mut self) -> ActionToken {
        self.tokens.issue()
    }

    /// Validates and executes the request. Token and permission checks both
    /// happen before any mutation; on failure the registry is exactly as it
    /// was.
    pub fn dispatch<R: RoleRegistry>(
        &mut self,
        registry: &mut R,
        caller: &Caller,
        request: &ActionRequest,
    ) -> ActionResponse {
        match self.authorize_and_run(registry, caller, request) {
            Ok(message) => ActionResponse::ok(message),
            Err(err) => {
                warn!(user = %caller.user, action = %request.action, error = %err, "admin action failed");
                ActionResponse::fail(err.to_string())
            }
        }
    }

    fn authorize_and_run<R: RoleRegistry>(
        &mut self,
        registry: &mut R,
        caller: &Caller,
        request: &ActionRequest,
    ) -> Result<String, AccessError> {
        if !self.tokens.validate(&request.token) {
            return Err(AccessError::InvalidToken);
        }

        let manage = CapabilityName::from(caps::MANAGE_PLATFORM);
        if !caller_can(registry, caller, &manage)? {
            return Err(AccessError::PermissionDenied(manage));
        }

        match request.action.as_str() {
            RESET_ACTION => {
                self.reconciler.reset_to_default(registry)?;
                Ok("Platform capabilities were reset to their defaults.".to_string())
            }
            other => Err(AccessError::UnknownAction(other.to_string())),
        }
    }
}

/// True when any of the caller's roles currently holds the capability.
fn caller_can<R: RoleRegistry>(
    registry: &R,
    caller: &Caller,
    cap: &CapabilityName,
) -> Result<bool, AccessError> {
    for role in &caller.roles {
        if registry.has_cap(role, cap)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_single_use() {
        let mut issuer = TokenIssuer::new();
        let token = issuer.issue();
        assert!(issuer.validate(&token));
        assert!(!issuer.validate(&token));
    }

    #[test]
    fn envelope_serializes_to_the_wire_shape() {
        let response = ActionResponse::ok("done");
        let json = response.to_json().unwrap();
        assert_eq!(json, r#"{"success":true,"message":"done"}"#);
    }
}
