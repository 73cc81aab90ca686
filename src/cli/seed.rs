// Seed sample content and, on request, the demo accounts

use chrono::NaiveDate;

use crate::app_data::AppData;
use crate::cli::accounts::provision_account;
use crate::data::{self, DEMO_ACCOUNTS};
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;

/// What a seed run inserted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub articles: usize,
    pub ads: usize,
    pub accounts: Vec<String>,
}

/// Insert the bundled sample content into empty tables
///
/// Content is only seeded when no article and no ad exist yet. Demo accounts
/// are created only when `demo_accounts` is set; existing usernames are left
/// alone.
pub async fn seed_database(app_data: &AppData, demo_accounts: bool) -> Result<SeedReport, InternalError> {
    let mut report = SeedReport::default();
    let content = data::seed_content()?;
    let provider = &app_data.content_provider;

    if provider.list_articles(None, false).await?.is_empty() && provider.list_ads().await?.is_empty() {
        for article in content.articles {
            // Order sample articles by their publication date
            let created_at = NaiveDate::parse_from_str(&article.published_date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp())
                .unwrap_or_else(|| app_data.clock.timestamp());
            report.articles += provider.store_imported_at(vec![article], created_at).await?;
        }
        for ad in content.ads {
            provider.store_ad(ad).await?;
            report.ads += 1;
        }
    } else {
        tracing::info!("Content already present, skipping sample content");
    }

    if demo_accounts {
        for demo in DEMO_ACCOUNTS {
            match provision_account(app_data, demo.username, demo.password, demo.role, Some(demo.phone_number)).await {
                Ok(account) => report.accounts.push(account.username),
                Err(InternalError::Credential(CredentialError::DuplicateUsername(name))) => {
                    tracing::info!(username = %name, "Demo account already exists");
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(report)
}

/// `seed` command
pub async fn seed(app_data: &AppData, demo_accounts: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = seed_database(app_data, demo_accounts).await?;

    println!("✓ Seeded {} article(s) and {} ad(s)", report.articles, report.ads);
    for username in &report.accounts {
        println!("✓ Created demo account '{}'", username);
    }
    if demo_accounts {
        println!("⚠️  Demo accounts use published passwords. Do not run this against a public deployment.");
    }

    Ok(())
}
