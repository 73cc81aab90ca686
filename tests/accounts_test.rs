mod common;

use common::{create_account, setup_test_app, sign_in};
use newshub_backend::cli::accounts::{encode_account_list, import_legacy_snapshot};
use newshub_backend::coordinators::{AdminCoordinator, CredentialChange, LoginResult};
use newshub_backend::errors::internal::CredentialError;
use newshub_backend::errors::InternalError;
use newshub_backend::providers::legacy_codec::{self, LegacyAccount};
use newshub_backend::types::internal::Role;
use std::collections::BTreeMap;

fn legacy(username: &str, role: &str, phone: Option<&str>) -> LegacyAccount {
    LegacyAccount {
        id: format!("legacy-{}", username),
        username: username.to_string(),
        role: role.to_string(),
        last_login: String::new(),
        phone_number: phone.map(str::to_string),
    }
}

fn encode_passwords(entries: &[(&str, &str)]) -> String {
    let map: BTreeMap<&str, &str> = entries.iter().copied().collect();
    legacy_codec::encode(&serde_json::to_string(&map).unwrap())
}

#[tokio::test]
async fn test_legacy_snapshot_import_hashes_passwords() {
    let app = setup_test_app().await;
    let users = legacy_codec::encode_accounts(&[
        legacy("chief", "admin", Some("+15550000001")),
        legacy("writer", "editor", None),
        legacy("intern", "viewer", None),
        legacy("nopass", "editor", None),
    ])
    .unwrap();
    let passwords = encode_passwords(&[
        ("chief", "ChiefPass!1"),
        ("writer", "abc"),
        ("intern", "InternPass!1"),
    ]);

    let report = import_legacy_snapshot(&app.app_data, &users, &passwords).await.unwrap();

    assert_eq!(report.created, vec!["chief".to_string(), "writer".to_string()]);
    assert_eq!(report.skipped, vec!["intern".to_string(), "nopass".to_string()]);

    // Legacy passwords are carried over even when shorter than the current minimum
    let auth = app.auth();
    assert!(matches!(
        auth.login("writer", "abc").await.unwrap(),
        LoginResult::Authenticated(_)
    ));
    let chief = app.app_data.account_store.find_by_username("chief").await.unwrap().unwrap();
    assert_eq!(chief.role, Role::Admin);
    assert_eq!(chief.phone_number.as_deref(), Some("+15550000001"));
}

#[tokio::test]
async fn test_legacy_import_skips_existing_usernames() {
    let app = setup_test_app().await;
    create_account(&app, "chief", "current-password", Role::Admin, None).await;
    let users = legacy_codec::encode_accounts(&[legacy("chief", "admin", None)]).unwrap();
    let passwords = encode_passwords(&[("chief", "old-password")]);

    let report = import_legacy_snapshot(&app.app_data, &users, &passwords).await.unwrap();

    assert!(report.created.is_empty());
    assert_eq!(report.skipped, vec!["chief".to_string()]);
    assert!(matches!(
        app.auth().login("chief", "current-password").await.unwrap(),
        LoginResult::Authenticated(_)
    ));
}

#[tokio::test]
async fn test_exported_account_list_decodes() {
    let app = setup_test_app().await;
    create_account(&app, "admin", "admin-password", Role::Admin, Some("+15550000009")).await;
    create_account(&app, "editor", "editor-password", Role::Editor, None).await;

    let encoded = encode_account_list(&app.app_data).await.unwrap();
    let decoded = legacy_codec::decode_accounts(&encoded).unwrap();

    let usernames: Vec<&str> = decoded.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(usernames, vec!["admin", "editor"]);
    assert_eq!(decoded[0].role, "admin");
    assert_eq!(decoded[0].phone_number.as_deref(), Some("+15550000009"));
    assert!(!encoded.contains("admin-password"));
}

#[tokio::test]
async fn test_password_change_keeps_only_current_session() {
    let app = setup_test_app().await;
    let editor = create_account(&app, "editor", "editor-password", Role::Editor, None).await;
    let (laptop, laptop_session) = sign_in(&app, "editor", "editor-password").await;
    let (phone, _) = sign_in(&app, "editor", "editor-password").await;
    let admin = AdminCoordinator::new(app.app_data.clone());

    admin
        .update_credentials(
            &laptop_session,
            &editor.id,
            CredentialChange {
                password: Some("rotated-password".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let auth = app.auth();
    assert!(auth.authenticate(laptop.token.as_str()).await.is_ok());
    assert!(auth.authenticate(phone.token.as_str()).await.is_err());
}

#[tokio::test]
async fn test_rename_moves_password_with_account() {
    let app = setup_test_app().await;
    let editor = create_account(&app, "editor", "editor-password", Role::Editor, Some("+15550000002")).await;
    let (_, session) = sign_in(&app, "editor", "editor-password").await;
    let admin = AdminCoordinator::new(app.app_data.clone());

    let renamed = admin
        .update_credentials(
            &session,
            &editor.id,
            CredentialChange {
                username: Some("  columnist ".to_string()),
                phone_number: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(renamed.username, "columnist");
    assert_eq!(renamed.phone_number, None);
    let auth = app.auth();
    assert!(matches!(
        auth.login("columnist", "editor-password").await.unwrap(),
        LoginResult::Authenticated(_)
    ));
    assert!(matches!(
        auth.login("editor", "editor-password").await.unwrap(),
        LoginResult::InvalidCredentials { .. }
    ));
}

#[tokio::test]
async fn test_admin_lists_accounts_and_rejects_short_passwords() {
    let app = setup_test_app().await;
    create_account(&app, "admin", "admin-password", Role::Admin, None).await;
    let editor = create_account(&app, "editor", "editor-password", Role::Editor, None).await;
    let (_, session) = sign_in(&app, "admin", "admin-password").await;
    let admin = AdminCoordinator::new(app.app_data.clone());

    assert_eq!(admin.list_accounts(&session).await.unwrap().len(), 2);

    let result = admin
        .update_credentials(
            &session,
            &editor.id,
            CredentialChange {
                password: Some("1234567".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Credential(CredentialError::PasswordTooShort(_)))
    ));
}

#[tokio::test]
async fn test_logout_closes_session() {
    let app = setup_test_app().await;
    create_account(&app, "editor", "editor-password", Role::Editor, None).await;
    let (open, _) = sign_in(&app, "editor", "editor-password").await;
    let auth = app.auth();

    auth.logout(open.token.as_str()).await.unwrap();

    assert!(matches!(
        auth.whoami(open.token.as_str()).await,
        Err(InternalError::Credential(CredentialError::InvalidSession { .. }))
    ));
}

#[tokio::test]
async fn test_session_expires_with_clock() {
    let app = setup_test_app().await;
    create_account(&app, "editor", "editor-password", Role::Editor, None).await;
    let (open, _) = sign_in(&app, "editor", "editor-password").await;

    app.clock.advance(chrono::Duration::minutes(61));

    assert!(app.auth().authenticate(open.token.as_str()).await.is_err());
}
