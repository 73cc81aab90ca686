use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AppSettings;
use crate::providers::{
    AuthenticationProvider, Clock, CodeDelivery, ContentProvider, CryptoProvider, LogDelivery, LoginGuard,
    OtpProvider, SystemClock, TokenProvider,
};
use crate::stores::{AccountStore, AdStore, ArticleStore, LoginAttemptStore, OtpStore, SessionStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, settings)
///   ↓ creates once
///   ├─ stores (accounts, login attempts, codes, sessions, articles, ads)
///   └─ providers (crypto, tokens, authentication, one-time codes, content)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ AuthCoordinator::new(app_data)
///   ├─ ContentCoordinator::new(app_data)
///   └─ AdminCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: AppSettings,
    pub clock: Arc<dyn Clock>,
    pub account_store: Arc<AccountStore>,
    pub session_store: Arc<SessionStore>,
    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
    pub otp_provider: Arc<OtpProvider>,
    pub content_provider: Arc<ContentProvider>,
}

impl AppData {
    /// Initialize with the wall clock and log-based code delivery
    ///
    /// The database must already be migrated.
    pub fn init(db: DatabaseConnection, settings: AppSettings) -> Self {
        Self::init_with(db, settings, Arc::new(SystemClock), Arc::new(LogDelivery))
    }

    /// Initialize with an explicit clock and delivery channel
    pub fn init_with(
        db: DatabaseConnection,
        settings: AppSettings,
        clock: Arc<dyn Clock>,
        delivery: Arc<dyn CodeDelivery>,
    ) -> Self {
        tracing::debug!("Creating stores...");
        let account_store = Arc::new(AccountStore::new(db.clone()));
        let attempt_store = Arc::new(LoginAttemptStore::new(db.clone()));
        let otp_store = Arc::new(OtpStore::new(db.clone()));
        let session_store = Arc::new(SessionStore::new(db.clone()));
        let article_store = Arc::new(ArticleStore::new(db.clone()));
        let ad_store = Arc::new(AdStore::new(db.clone()));

        tracing::debug!("Creating providers...");
        let crypto_provider = Arc::new(CryptoProvider::new(settings.password_pepper().to_string()));
        let token_provider = Arc::new(TokenProvider::new(
            settings.jwt_secret().to_string(),
            settings.session_ttl(),
        ));
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            account_store.clone(),
            attempt_store,
            crypto_provider.clone(),
            clock.clone(),
            LoginGuard::new(settings.max_login_attempts(), settings.lockout_duration()),
            settings.login_delay(),
        ));
        let otp_provider = Arc::new(OtpProvider::new(
            otp_store,
            account_store.clone(),
            crypto_provider.clone(),
            delivery,
            clock.clone(),
            settings.password_pepper().to_string(),
            settings.otp_ttl(),
        ));
        let content_provider = Arc::new(ContentProvider::new(article_store, ad_store, clock.clone()));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            settings,
            clock,
            account_store,
            session_store,
            crypto_provider,
            token_provider,
            authentication_provider,
            otp_provider,
            content_provider,
        }
    }
}
