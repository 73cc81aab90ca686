use crate::api::auth::BearerAuth;
use crate::coordinators::{AuthCoordinator, AuthenticatedSession};
use crate::errors::AdminError;

/// Resolve the bearer token on an admin request to its live session
pub async fn require_session(
    auth_coordinator: &AuthCoordinator,
    auth: &BearerAuth,
) -> Result<AuthenticatedSession, AdminError> {
    auth_coordinator
        .authenticate(&auth.0.token)
        .await
        .map_err(AdminError::from)
}

/// Trim a query parameter and drop it when blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
