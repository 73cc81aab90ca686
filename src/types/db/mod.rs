// Database entities - SeaORM models
pub mod account;
pub mod article;
pub mod credential;
pub mod login_attempt;
pub mod one_time_code;
pub mod session;
pub mod sponsored_ad;
