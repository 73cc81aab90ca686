mod common;

use common::{create_account, setup_test_app, sign_in};
use newshub_backend::cli::{accounts, content};
use newshub_backend::coordinators::ContentCoordinator;
use newshub_backend::errors::internal::ImportError;
use newshub_backend::errors::InternalError;
use newshub_backend::providers::legacy_codec;
use newshub_backend::types::internal::Role;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_written_template_imports_from_disk() {
    let app = setup_test_app().await;
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("news_template.csv");

    content::template(Some(&path)).unwrap();
    let report = content::import_file(&app.app_data, &path).await.unwrap();

    assert_eq!(report.accepted.len(), 2);
    assert!(report.errors.is_empty());
    let stored = ContentCoordinator::new(app.app_data.clone())
        .list_articles(None, false)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_import_file_rejects_non_csv_before_reading() {
    let app = setup_test_app().await;
    let temp_dir = TempDir::new().unwrap();
    // Never created; the name check must fail first
    let path = temp_dir.path().join("news.xlsx");

    let err = content::import_file(&app.app_data, &path).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<InternalError>(),
        Some(InternalError::Import(ImportError::UnsupportedFileType(_)))
    ));
}

#[tokio::test]
async fn test_exported_accounts_load_into_fresh_store() {
    let source = setup_test_app().await;
    create_account(&source, "chief", "chief-password", Role::Admin, Some("+15550000042")).await;
    let temp_dir = TempDir::new().unwrap();
    let users_file = temp_dir.path().join("users.txt");
    let passwords_file = temp_dir.path().join("passwords.txt");

    accounts::export_accounts(&source.app_data, Some(&users_file)).await.unwrap();
    fs::write(
        &passwords_file,
        legacy_codec::encode(r#"{"chief":"chief-password"}"#),
    )
    .unwrap();

    let target = setup_test_app().await;
    accounts::import_legacy(&target.app_data, &users_file, &passwords_file)
        .await
        .unwrap();

    let (_, session) = sign_in(&target, "chief", "chief-password").await;
    assert_eq!(session.account.role, Role::Admin);
    assert_eq!(session.account.phone_number.as_deref(), Some("+15550000042"));
}
