mod common;

use chrono::Duration;
use common::{create_account, setup_test_app, setup_test_app_with, setup_test_app_with_delay};
use newshub_backend::coordinators::{AuthCoordinator, LoginResult};
use newshub_backend::errors::internal::CredentialError;
use newshub_backend::errors::InternalError;
use newshub_backend::providers::GuardStatus;
use newshub_backend::types::internal::{OtpPurpose, Role};

const PASSWORD: &str = "editor-password";

#[tokio::test]
async fn test_fourth_attempt_is_locked_even_with_correct_password() {
    let app = setup_test_app().await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;
    let auth = app.auth();

    let expected_remaining = [2, 1, 0];
    for remaining in expected_remaining {
        match auth.login("editor", "wrong-password").await.unwrap() {
            LoginResult::InvalidCredentials {
                remaining_attempts, ..
            } => assert_eq!(remaining_attempts, remaining),
            other => panic!("expected invalid credentials, got {:?}", other),
        }
    }

    match auth.login("editor", PASSWORD).await.unwrap() {
        LoginResult::Locked {
            retry_after_seconds, ..
        } => assert_eq!(retry_after_seconds, 15 * 60),
        other => panic!("expected lockout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_third_failure_reports_lock_expiry() {
    let app = setup_test_app().await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;
    let auth = app.auth();
    let start = app.app_data.clock.timestamp();

    auth.login("editor", "nope").await.unwrap();
    auth.login("editor", "nope").await.unwrap();
    match auth.login("editor", "nope").await.unwrap() {
        LoginResult::InvalidCredentials {
            remaining_attempts,
            locked_until,
        } => {
            assert_eq!(remaining_attempts, 0);
            assert_eq!(locked_until, Some(start + 15 * 60));
        }
        other => panic!("expected the locking failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_resets_failure_counter() {
    let app = setup_test_app().await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;
    let auth = app.auth();

    auth.login("editor", "wrong").await.unwrap();
    auth.login("editor", "wrong").await.unwrap();
    assert!(matches!(
        auth.login("editor", PASSWORD).await.unwrap(),
        LoginResult::Authenticated(_)
    ));

    match auth.lockout_status("editor").await.unwrap() {
        GuardStatus::Open {
            failed_attempts,
            remaining_attempts,
        } => {
            assert_eq!(failed_attempts, 0);
            assert_eq!(remaining_attempts, 3);
        }
        other => panic!("expected open status, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lockout_expires_after_lockout_period() {
    let app = setup_test_app().await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;
    let auth = app.auth();

    for _ in 0..3 {
        auth.login("editor", "wrong").await.unwrap();
    }

    app.clock.advance(Duration::minutes(14));
    match auth.lockout_status("editor").await.unwrap() {
        GuardStatus::Locked {
            retry_after_seconds, ..
        } => assert_eq!(retry_after_seconds, 60),
        other => panic!("expected lockout, got {:?}", other),
    }

    app.clock.advance(Duration::minutes(1));
    assert!(!auth.lockout_status("editor").await.unwrap().is_locked());
    assert!(matches!(
        auth.login("editor", PASSWORD).await.unwrap(),
        LoginResult::Authenticated(_)
    ));
}

#[tokio::test]
async fn test_unknown_username_failures_also_lock() {
    let app = setup_test_app().await;
    let auth = app.auth();

    for _ in 0..3 {
        auth.login("ghost", "whatever").await.unwrap();
    }

    assert!(matches!(
        auth.login("ghost", "whatever").await.unwrap(),
        LoginResult::Locked { .. }
    ));
}

#[tokio::test]
async fn test_lockout_is_per_username() {
    let app = setup_test_app().await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;
    create_account(&app, "admin", "admin-password", Role::Admin, None).await;
    let auth = app.auth();

    for _ in 0..3 {
        auth.login("editor", "wrong").await.unwrap();
    }

    assert!(matches!(
        auth.login("admin", "admin-password").await.unwrap(),
        LoginResult::Authenticated(_)
    ));
}

#[tokio::test]
async fn test_lockout_blocks_code_login() {
    let app = setup_test_app().await;
    create_account(&app, "editor", PASSWORD, Role::Editor, Some("+15551230000")).await;
    let auth = app.auth();

    for _ in 0..3 {
        auth.login("editor", "wrong").await.unwrap();
    }
    assert!(auth.send_code("+15551230000", OtpPurpose::Login).await.unwrap());
    let code = app.delivery.last_code("+15551230000").unwrap();

    let result = auth.login_with_code("+15551230000", &code).await;

    assert!(matches!(
        result,
        Err(InternalError::Credential(CredentialError::Locked { .. }))
    ));
}

#[tokio::test]
async fn test_threshold_and_period_follow_settings() {
    let app = setup_test_app_with(&[("MAX_LOGIN_ATTEMPTS", "5"), ("LOCKOUT_MINUTES", "1")]).await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;
    let auth = app.auth();

    for _ in 0..4 {
        assert!(matches!(
            auth.login("editor", "wrong").await.unwrap(),
            LoginResult::InvalidCredentials { locked_until: None, .. }
        ));
    }
    auth.login("editor", "wrong").await.unwrap();

    match auth.lockout_status("editor").await.unwrap() {
        GuardStatus::Locked {
            retry_after_seconds, ..
        } => assert_eq!(retry_after_seconds, 60),
        other => panic!("expected lockout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_guesses_each_count_toward_lockout() {
    let app = setup_test_app_with_delay(std::time::Duration::from_millis(50)).await;
    create_account(&app, "editor", PASSWORD, Role::Editor, None).await;

    let mut handles = Vec::new();
    for i in 0..10 {
        let app_data = app.app_data.clone();
        handles.push(tokio::spawn(async move {
            AuthCoordinator::new(app_data)
                .login("editor", &format!("guess-{}", i))
                .await
                .unwrap()
        }));
    }

    let mut invalid = 0;
    let mut locked = 0;
    for handle in handles {
        match handle.await.unwrap() {
            LoginResult::InvalidCredentials { .. } => invalid += 1,
            LoginResult::Locked { .. } => locked += 1,
            other => panic!("guess should not succeed, got {:?}", other),
        }
    }
    assert_eq!(invalid, 3);
    assert_eq!(locked, 7);

    assert!(matches!(
        app.auth().login("editor", PASSWORD).await.unwrap(),
        LoginResult::Locked { .. }
    ));
}
