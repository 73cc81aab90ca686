// Stores layer - Data access and repository pattern
pub mod account_store;
pub mod ad_store;
pub mod article_store;
pub mod login_attempt_store;
pub mod otp_store;
pub mod session_store;

pub use account_store::{AccountStore, CredentialUpdate};
pub use ad_store::AdStore;
pub use article_store::ArticleStore;
pub use login_attempt_store::LoginAttemptStore;
pub use otp_store::OtpStore;
pub use session_store::SessionStore;
