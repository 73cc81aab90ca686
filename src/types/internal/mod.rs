// Internal domain types shared by stores, providers and coordinators
pub mod account;
pub mod auth;
pub mod content;

pub use account::{Account, Role};
pub use auth::{Claims, LoginAttemptState, OtpPurpose, SessionToken};
pub use content::{AdDraft, Article, ArticleDraft, Category, NewspaperLayout, SponsoredAd};
