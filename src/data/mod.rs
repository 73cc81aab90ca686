//! Reference and seed data bundled with the binary
pub mod categories;

use serde::Deserialize;

use crate::errors::InternalError;
use crate::types::internal::{Article, Role, SponsoredAd};

pub use categories::{category_ids, category_name, is_known_category, CATEGORIES};

const SEED_CONTENT: &str = include_str!("seed_content.json");

/// Articles and ads loaded by `seed`
#[derive(Debug, Deserialize)]
pub struct SeedContent {
    pub articles: Vec<Article>,
    pub ads: Vec<SponsoredAd>,
}

pub fn seed_content() -> Result<SeedContent, InternalError> {
    serde_json::from_str(SEED_CONTENT).map_err(|e| InternalError::parse("seed_content", e.to_string()))
}

/// Demo login created only on explicit request
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub phone_number: &'static str,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        username: "admin",
        password: "SecureAdmin123!@#",
        role: Role::Admin,
        phone_number: "+1234567890",
    },
    DemoAccount {
        username: "editor",
        password: "SecureEditor123!@#",
        role: Role::Editor,
        phone_number: "+1234567891",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_seed_content_parses() {
        let seed = seed_content().unwrap();

        assert_eq!(seed.articles.len(), 6);
        assert_eq!(seed.ads.len(), 4);
        assert!(seed.articles.iter().all(|a| is_known_category(&a.category)));
    }
}
