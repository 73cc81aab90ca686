use poem_openapi::{auth::Bearer, param::Query, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, LoginResult};
use crate::errors::api::auth::format_countdown;
use crate::errors::AuthError;
use crate::providers::GuardStatus;
use crate::types::dto::auth::{
    AccountResponse, CodeLoginRequest, LockoutStatusResponse, LoginApiResponse, LoginRequest, PasswordResetRequest,
    SendCodeRequest, SendCodeResponse, SessionResponse,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::OtpPurpose;

/// Authentication API endpoints
pub struct AuthApi {
    auth_coordinator: Arc<AuthCoordinator>,
    lockout_seconds: i64,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let lockout_seconds = i64::try_from(app_data.settings.lockout_duration().as_secs()).unwrap_or(i64::MAX);
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data)),
            lockout_seconds,
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username and password
    ///
    /// Three consecutive failures lock the username for the lockout period.
    /// While locked, requests are refused with 423 without checking the password.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<LoginApiResponse, AuthError> {
        match self.auth_coordinator.login(&body.username, &body.password).await? {
            LoginResult::Authenticated(session) => Ok(LoginApiResponse::Ok(Json(SessionResponse::from(session)))),
            LoginResult::InvalidCredentials {
                locked_until: Some(_), ..
            } => Err(AuthError::lockout_started(self.lockout_seconds)),
            LoginResult::InvalidCredentials { remaining_attempts, .. } => {
                Err(AuthError::invalid_credentials_remaining(remaining_attempts))
            }
            LoginResult::Locked {
                retry_after_seconds, ..
            } => Err(AuthError::locked(retry_after_seconds)),
        }
    }

    /// Current lockout state of a username, for the countdown display
    #[oai(path = "/lockout", method = "get", tag = "AuthTags::Authentication")]
    async fn lockout(&self, username: Query<String>) -> Result<Json<LockoutStatusResponse>, AuthError> {
        let response = match self.auth_coordinator.lockout_status(&username.0).await? {
            GuardStatus::Open { remaining_attempts, .. } => LockoutStatusResponse {
                locked: false,
                locked_until: None,
                retry_after_seconds: 0,
                countdown: format_countdown(0),
                remaining_attempts,
            },
            GuardStatus::Locked {
                until,
                retry_after_seconds,
            } => LockoutStatusResponse {
                locked: true,
                locked_until: Some(until),
                retry_after_seconds,
                countdown: format_countdown(retry_after_seconds),
                remaining_attempts: 0,
            },
        };

        Ok(Json(response))
    }

    /// Send a one-time code to a registered phone number
    #[oai(path = "/otp/send", method = "post", tag = "AuthTags::Authentication")]
    async fn send_code(&self, body: Json<SendCodeRequest>) -> Result<Json<SendCodeResponse>, AuthError> {
        let purpose = match body.purpose.as_deref() {
            None => OtpPurpose::Login,
            Some(p) => p
                .parse::<OtpPurpose>()
                .map_err(|e| AuthError::bad_request(e.to_string()))?,
        };

        let sent = self.auth_coordinator.send_code(&body.phone_number, purpose).await?;
        let message = if sent {
            "Verification code sent".to_string()
        } else {
            "No account is registered with this phone number".to_string()
        };

        Ok(Json(SendCodeResponse { sent, message }))
    }

    /// Login with a one-time code
    #[oai(path = "/otp/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login_with_code(&self, body: Json<CodeLoginRequest>) -> Result<LoginApiResponse, AuthError> {
        let session = self
            .auth_coordinator
            .login_with_code(&body.phone_number, &body.code)
            .await?;
        Ok(LoginApiResponse::Ok(Json(SessionResponse::from(session))))
    }

    /// Reset a password with a one-time code sent for `reset`
    #[oai(path = "/password/reset", method = "post", tag = "AuthTags::Authentication")]
    async fn reset_password(&self, body: Json<PasswordResetRequest>) -> Result<Json<MessageResponse>, AuthError> {
        self.auth_coordinator
            .reset_password(&body.username, &body.new_password, &body.code)
            .await?;
        Ok(Json(MessageResponse::new("Password updated")))
    }

    /// Close the current session
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: BearerAuth) -> Result<Json<MessageResponse>, AuthError> {
        self.auth_coordinator.logout(&auth.0.token).await?;
        Ok(Json(MessageResponse::new("Logged out successfully")))
    }

    /// Account behind the current session
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<AccountResponse>, AuthError> {
        let account = self.auth_coordinator.whoami(&auth.0.token).await?;
        Ok(Json(AccountResponse::from(account)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_account, setup_test_app, TestApp};
    use crate::types::internal::Role;

    async fn setup_api() -> (TestApp, AuthApi) {
        let app = setup_test_app().await;
        create_test_account(
            &app.app_data,
            "admin",
            "correct-horse-battery",
            Role::Admin,
            Some("+15550001111"),
        )
        .await;
        let api = AuthApi::new(app.app_data.clone());
        (app, api)
    }

    fn login_request(username: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let (_app, api) = setup_api().await;

        let LoginApiResponse::Ok(Json(session)) = api
            .login(login_request("admin", "correct-horse-battery"))
            .await
            .unwrap();

        assert!(!session.access_token.is_empty());
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.account.username, "admin");
        assert_eq!(session.account.role, "admin");
    }

    #[tokio::test]
    async fn test_failed_logins_count_down_then_lock() {
        let (_app, api) = setup_api().await;

        let first = api.login(login_request("admin", "wrong")).await.err().unwrap();
        assert!(matches!(first, AuthError::InvalidCredentials(_)));
        assert_eq!(first.message(), "Invalid credentials. 2 attempts remaining.");

        let second = api.login(login_request("admin", "wrong")).await.err().unwrap();
        assert_eq!(second.message(), "Invalid credentials. 1 attempts remaining.");

        let third = api.login(login_request("admin", "wrong")).await.err().unwrap();
        assert!(matches!(third, AuthError::Locked(_)));
        assert_eq!(
            third.message(),
            "Account locked for 15 minutes due to multiple failed attempts."
        );

        // Correct password is refused while locked
        let fourth = api
            .login(login_request("admin", "correct-horse-battery"))
            .await
            .err()
            .unwrap();
        assert!(matches!(fourth, AuthError::Locked(_)));
    }

    #[tokio::test]
    async fn test_lockout_status_reports_countdown() {
        let (app, api) = setup_api().await;

        let Json(open) = api.lockout(Query("admin".to_string())).await.unwrap();
        assert!(!open.locked);
        assert_eq!(open.remaining_attempts, 3);

        for _ in 0..3 {
            let _ = api.login(login_request("admin", "wrong")).await;
        }
        app.clock.advance(chrono::Duration::seconds(60));

        let Json(locked) = api.lockout(Query("admin".to_string())).await.unwrap();
        assert!(locked.locked);
        assert_eq!(locked.retry_after_seconds, 14 * 60);
        assert_eq!(locked.countdown, "14:00");
        assert_eq!(locked.remaining_attempts, 0);
    }

    #[tokio::test]
    async fn test_send_code_rejects_unknown_purpose() {
        let (_app, api) = setup_api().await;

        let result = api
            .send_code(Json(SendCodeRequest {
                phone_number: "+15550001111".to_string(),
                purpose: Some("signup".to_string()),
            }))
            .await;

        assert!(matches!(result, Err(AuthError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_code_login_then_whoami_and_logout() {
        let (app, api) = setup_api().await;

        let Json(sent) = api
            .send_code(Json(SendCodeRequest {
                phone_number: "+15550001111".to_string(),
                purpose: None,
            }))
            .await
            .unwrap();
        assert!(sent.sent);

        let code = app.delivery.last_code("+15550001111").unwrap();
        let LoginApiResponse::Ok(Json(session)) = api
            .login_with_code(Json(CodeLoginRequest {
                phone_number: "+15550001111".to_string(),
                code,
            }))
            .await
            .unwrap();

        let bearer = || {
            BearerAuth(Bearer {
                token: session.access_token.clone(),
            })
        };
        let Json(account) = api.whoami(bearer()).await.unwrap();
        assert_eq!(account.username, "admin");

        api.logout(bearer()).await.unwrap();
        let after = api.whoami(bearer()).await;
        assert!(matches!(after, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_send_code_to_unknown_phone() {
        let (_app, api) = setup_api().await;

        let Json(sent) = api
            .send_code(Json(SendCodeRequest {
                phone_number: "+19999999999".to_string(),
                purpose: Some("reset".to_string()),
            }))
            .await
            .unwrap();

        assert!(!sent.sent);
    }
}
