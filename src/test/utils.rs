// Test utilities shared across unit tests
// Only compiled when running tests

use async_trait::async_trait;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::app_data::AppData;
use crate::cli::accounts::provision_account;
use crate::cli::seed::seed_database;
use crate::config::{AppSettings, MapEnvironment};
use crate::errors::InternalError;
use crate::providers::{CodeDelivery, ManualClock};
use crate::types::internal::{Account, OtpPurpose, Role};

/// Delivery channel that keeps codes in memory so tests can read them back
#[derive(Default)]
pub struct RecordingDelivery {
    delivered: Mutex<Vec<(String, String, OtpPurpose)>>,
}

impl RecordingDelivery {
    /// Most recent code sent to `phone_number`
    pub fn last_code(&self, phone_number: &str) -> Option<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(phone, _, _)| phone == phone_number)
            .map(|(_, code, _)| code.clone())
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

/// Fully wired application over an in-memory database
pub struct TestApp {
    pub db: DatabaseConnection,
    pub app_data: Arc<AppData>,
    pub clock: Arc<ManualClock>,
    pub delivery: Arc<RecordingDelivery>,
}

/// Settings with test secrets and no login delay
pub fn test_settings() -> AppSettings {
    let env = MapEnvironment::empty().with_vars(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("JWT_SECRET", "test-secret-key-minimum-32-characters-long"),
        ("PASSWORD_PEPPER", "test-pepper-for-unit-tests"),
    ]);
    AppSettings::from_env_provider(Arc::new(env))
        .expect("Failed to build test settings")
        .with_login_delay(Duration::ZERO)
}

/// Creates a migrated in-memory database
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates an AppData with a manual clock and recorded code delivery
pub async fn setup_test_app() -> TestApp {
    let db = setup_test_db().await;
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let delivery = Arc::new(RecordingDelivery::default());
    let app_data = Arc::new(AppData::init_with(
        db.clone(),
        test_settings(),
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

pub async fn create_test_account(
    app_data: &AppData,
    username: &str,
    password: &str,
    role: Role,
    phone_number: Option<&str>,
) -> Account {
    provision_account(app_data, username, password, role, phone_number)
        .await
        .expect("Failed to create test account")
}

/// Loads the bundled sample articles and ads
pub async fn seed_test_content(app_data: &AppData) {
    seed_database(app_data, false)
        .await
        .expect("Failed to seed test content");
}
