mod common;

use chrono::Duration;
use common::{create_account, setup_test_app, TestApp};
use newshub_backend::coordinators::LoginResult;
use newshub_backend::errors::internal::CredentialError;
use newshub_backend::errors::InternalError;
use newshub_backend::providers::otp_provider::MAX_CODE_CHECKS;
use newshub_backend::providers::GuardStatus;
use newshub_backend::types::internal::{OtpPurpose, Role};

const PHONE: &str = "+15550102030";

async fn setup() -> TestApp {
    let app = setup_test_app().await;
    create_account(&app, "editor", "editor-password", Role::Editor, Some(PHONE)).await;
    app
}

fn is_invalid_code(result: &Result<impl std::fmt::Debug, InternalError>) -> bool {
    matches!(result, Err(InternalError::Credential(CredentialError::InvalidCode)))
}

#[tokio::test]
async fn test_code_is_six_digits() {
    let app = setup().await;

    assert!(app.auth().send_code(PHONE, OtpPurpose::Login).await.unwrap());

    let code = app.delivery.last_code(PHONE).unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_unknown_phone_gets_no_code() {
    let app = setup().await;

    assert!(!app.auth().send_code("+19990000000", OtpPurpose::Login).await.unwrap());
    assert_eq!(app.delivery.count(), 0);
}

#[tokio::test]
async fn test_code_is_single_use() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();

    let session = auth.login_with_code(PHONE, &code).await.unwrap();
    assert_eq!(session.account.username, "editor");
    assert!(session.account.last_login.is_some());

    let second = auth.login_with_code(PHONE, &code).await;
    assert!(is_invalid_code(&second));
}

#[tokio::test]
async fn test_login_code_cannot_reset_password() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();

    let result = auth.reset_password("editor", "brand-new-password", &code).await;

    assert!(is_invalid_code(&result));
}

#[tokio::test]
async fn test_reset_code_cannot_log_in() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Reset).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();

    let result = auth.login_with_code(PHONE, &code).await;

    assert!(is_invalid_code(&result));
}

#[tokio::test]
async fn test_newer_code_replaces_older_one() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let first = app.delivery.last_code(PHONE).unwrap();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let second = app.delivery.last_code(PHONE).unwrap();

    if first != second {
        assert!(is_invalid_code(&auth.login_with_code(PHONE, &first).await));
    }
    assert!(auth.login_with_code(PHONE, &second).await.is_ok());
}

#[tokio::test]
async fn test_code_expires_after_ttl() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();

    app.clock.advance(Duration::seconds(301));

    assert!(is_invalid_code(&auth.login_with_code(PHONE, &code).await));
}

#[tokio::test]
async fn test_code_valid_until_expiry_instant() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();

    app.clock.advance(Duration::seconds(300));

    assert!(auth.login_with_code(PHONE, &code).await.is_ok());
}

#[tokio::test]
async fn test_wrong_code_does_not_count_as_failed_login() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();

    for _ in 0..5 {
        let _ = auth.login_with_code(PHONE, "not-a-code").await;
    }

    assert_eq!(
        auth.lockout_status("editor").await.unwrap(),
        GuardStatus::Open {
            failed_attempts: 0,
            remaining_attempts: 3
        }
    );
}

#[tokio::test]
async fn test_password_reset_replaces_password_and_closes_sessions() {
    let app = setup().await;
    let auth = app.auth();
    let (open, _) = common::sign_in(&app, "editor", "editor-password").await;

    auth.send_code(PHONE, OtpPurpose::Reset).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();
    auth.reset_password("editor", "brand-new-password", &code).await.unwrap();

    assert!(auth.authenticate(open.token.as_str()).await.is_err());
    assert!(matches!(
        auth.login("editor", "editor-password").await.unwrap(),
        LoginResult::InvalidCredentials { .. }
    ));
    assert!(matches!(
        auth.login("editor", "brand-new-password").await.unwrap(),
        LoginResult::Authenticated(_)
    ));
}

#[tokio::test]
async fn test_password_reset_enforces_minimum_length() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Reset).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();

    let result = auth.reset_password("editor", "short", &code).await;

    assert!(matches!(
        result,
        Err(InternalError::Credential(CredentialError::PasswordTooShort(_)))
    ));
    // The code was not consumed by the rejected request
    assert!(auth.reset_password("editor", "long-enough-now", &code).await.is_ok());
}

#[tokio::test]
async fn test_code_is_discarded_after_repeated_wrong_guesses() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..MAX_CODE_CHECKS {
        assert!(is_invalid_code(&auth.login_with_code(PHONE, wrong).await));
    }

    // The real code no longer works once the guesses are used up
    assert!(is_invalid_code(&auth.login_with_code(PHONE, &code).await));

    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let fresh = app.delivery.last_code(PHONE).unwrap();
    assert!(auth.login_with_code(PHONE, &fresh).await.is_ok());
}

#[tokio::test]
async fn test_code_survives_fewer_wrong_guesses_than_the_cap() {
    let app = setup().await;
    let auth = app.auth();
    auth.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = app.delivery.last_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..MAX_CODE_CHECKS - 1 {
        assert!(is_invalid_code(&auth.login_with_code(PHONE, wrong).await));
    }

    assert!(auth.login_with_code(PHONE, &code).await.is_ok());
}
