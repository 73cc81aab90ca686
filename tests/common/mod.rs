// Common test utilities for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use newshub_backend::app_data::AppData;
use newshub_backend::cli::accounts::provision_account;
use newshub_backend::config::{AppSettings, MapEnvironment};
use newshub_backend::coordinators::{AuthCoordinator, AuthenticatedSession, LoginResult, OpenSession};
use newshub_backend::errors::InternalError;
use newshub_backend::providers::{CodeDelivery, ManualClock};
use newshub_backend::types::internal::{Account, OtpPurpose, Role};
use sea_orm::{Database, DatabaseConnection};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Delivery channel that keeps codes in memory
#[derive(Default)]
pub struct RecordingDelivery {
    delivered: Mutex<Vec<(String, String, OtpPurpose)>>,
}

impl RecordingDelivery {
    pub fn last_code(&self, phone_number: &str) -> Option<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(phone, _, _)| phone == phone_number)
            .map(|(_, code, _)| code.clone())
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDelivery for RecordingDelivery {
    async fn deliver(&self, phone_number: &str, code: &str, purpose: OtpPurpose) -> Result<(), InternalError> {
        self.delivered
            .lock()
            .unwrap()
            .push((phone_number.to_string(), code.to_string(), purpose));
        Ok(())
    }
}

pub struct TestApp {
    pub db: DatabaseConnection,
    pub app_data: Arc<AppData>,
    pub clock: Arc<ManualClock>,
    pub delivery: Arc<RecordingDelivery>,
}

impl TestApp {
    pub fn auth(&self) -> AuthCoordinator {
        AuthCoordinator::new(self.app_data.clone())
    }
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_settings(extra: &[(&str, &str)]) -> AppSettings {
    let env = MapEnvironment::empty()
        .with_vars(&[
            ("JWT_SECRET", "integration-secret-key-at-least-32-chars"),
            ("PASSWORD_PEPPER", "integration-pepper-value"),
        ])
        .with_vars(extra);
    AppSettings::from_env_provider(Arc::new(env))
        .expect("Failed to build test settings")
        .with_login_delay(Duration::ZERO)
}

/// Creates the full application over an in-memory database
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

pub async fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    build_test_app(test_settings(extra)).await
}

/// Like `setup_test_app` but keeps a real login delay
pub async fn setup_test_app_with_delay(login_delay: Duration) -> TestApp {
    build_test_app(test_settings(&[]).with_login_delay(login_delay)).await
}

async fn build_test_app(settings: AppSettings) -> TestApp {
    let db = setup_test_db().await;
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let delivery = Arc::new(RecordingDelivery::default());
    let app_data = Arc::new(AppData::init_with(
        db.clone(),
        settings,
        clock.clone(),
        delivery.clone(),
    ));

    TestApp {
        db,
        app_data,
        clock,
        delivery,
    }
}

pub async fn create_account(
    app: &TestApp,
    username: &str,
    password: &str,
    role: Role,
    phone_number: Option<&str>,
) -> Account {
    provision_account(&app.app_data, username, password, role, phone_number)
        .await
        .expect("Failed to create test account")
}

/// Logs in and resolves the resulting token to its session
pub async fn sign_in(app: &TestApp, username: &str, password: &str) -> (OpenSession, AuthenticatedSession) {
    let auth = app.auth();
    let session = match auth.login(username, password).await.expect("login failed") {
        LoginResult::Authenticated(session) => session,
        other => panic!("expected a session, got {:?}", other),
    };
    let resolved = auth
        .authenticate(session.token.as_str())
        .await
        .expect("fresh session should authenticate");
    (session, resolved)
}
