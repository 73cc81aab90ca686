use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::auth_coordinator::AuthenticatedSession;
use crate::errors::InternalError;
use crate::providers::bulk_import::{self, ImportReport};
use crate::providers::{Clock, ContentProvider, CryptoProvider, PasswordValidatorProvider, PurgeReport};
use crate::stores::{AccountStore, CredentialUpdate, SessionStore};
use crate::types::internal::{AdDraft, Account, Article, ArticleDraft, Role, SponsoredAd};

/// Requested changes to an account's login details
///
/// `None` leaves the field as it is. An empty phone number clears it.
#[derive(Debug, Default, Clone)]
pub struct CredentialChange {
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
}

/// Orchestrates the admin surface: content editing, bulk import, accounts and purge
///
/// Any signed-in account may edit content. Account management and purge need
/// the admin role, except that an editor may change their own credentials.
pub struct AdminCoordinator {
    account_store: Arc<AccountStore>,
    session_store: Arc<SessionStore>,
    content_provider: Arc<ContentProvider>,
    crypto_provider: Arc<CryptoProvider>,
    password_validator: PasswordValidatorProvider,
    clock: Arc<dyn Clock>,
}

impl AdminCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            account_store: Arc::clone(&app_data.account_store),
            session_store: Arc::clone(&app_data.session_store),
            content_provider: Arc::clone(&app_data.content_provider),
            crypto_provider: Arc::clone(&app_data.crypto_provider),
            password_validator: PasswordValidatorProvider::new(),
            clock: Arc::clone(&app_data.clock),
        }
    }

    pub async fn create_article(&self, actor: &AuthenticatedSession, draft: ArticleDraft) -> Result<Article, InternalError> {
        let article = self.content_provider.create_article(draft).await?;
        tracing::info!(actor = %actor.account.username, article_id = %article.id, "Article created");
        Ok(article)
    }

    pub async fn update_article(
        &self,
        actor: &AuthenticatedSession,
        id: &str,
        draft: ArticleDraft,
    ) -> Result<Article, InternalError> {
        tracing::debug!(actor = %actor.account.username, article_id = id, "Updating article");
        self.content_provider.update_article(id, draft).await
    }

    pub async fn delete_article(&self, actor: &AuthenticatedSession, id: &str) -> Result<(), InternalError> {
        tracing::debug!(actor = %actor.account.username, article_id = id, "Deleting article");
        self.content_provider.delete_article(id).await
    }

    /// Validate and store a bulk import file
    ///
    /// The file name is checked before the contents are looked at. Valid rows
    /// are stored together; invalid rows are only reported.
    pub async fn import_articles(
        &self,
        actor: &AuthenticatedSession,
        file_name: &str,
        text: &str,
    ) -> Result<ImportReport, InternalError> {
        bulk_import::check_file_name(file_name)?;

        let report = bulk_import::import_batch(text, self.clock.now());
        self.content_provider.store_imported(report.accepted.clone()).await?;
        tracing::info!(
            actor = %actor.account.username,
            file_name,
            accepted = report.accepted.len(),
            rejected = report.errors.len(),
            "Bulk import finished"
        );

        Ok(report)
    }

    pub fn import_template(&self) -> &'static str {
        bulk_import::TEMPLATE
    }

    pub async fn create_ad(&self, actor: &AuthenticatedSession, draft: AdDraft) -> Result<SponsoredAd, InternalError> {
        tracing::debug!(actor = %actor.account.username, "Creating sponsored ad");
        self.content_provider.create_ad(draft).await
    }

    pub async fn update_ad(
        &self,
        actor: &AuthenticatedSession,
        id: &str,
        draft: AdDraft,
    ) -> Result<SponsoredAd, InternalError> {
        tracing::debug!(actor = %actor.account.username, ad_id = id, "Updating sponsored ad");
        self.content_provider.update_ad(id, draft).await
    }

    pub async fn delete_ad(&self, actor: &AuthenticatedSession, id: &str) -> Result<(), InternalError> {
        tracing::debug!(actor = %actor.account.username, ad_id = id, "Deleting sponsored ad");
        self.content_provider.delete_ad(id).await
    }

    pub async fn list_accounts(&self, actor: &AuthenticatedSession) -> Result<Vec<Account>, InternalError> {
        actor.require_role(Role::Admin)?;
        self.account_store.list_accounts().await
    }

    /// Change username, password or phone number of an account
    ///
    /// The password entry follows a username change. A password change closes
    /// every other session of the account.
    pub async fn update_credentials(
        &self,
        actor: &AuthenticatedSession,
        account_id: &str,
        change: CredentialChange,
    ) -> Result<Account, InternalError> {
        if actor.account.id != account_id {
            actor.require_role(Role::Admin)?;
        }

        let username = change
            .username
            .as_deref()
            .map(|u| self.password_validator.validate_username(u).map(str::to_string))
            .transpose()?;
        let password_hash = match change.password.as_deref() {
            Some(password) => {
                self.password_validator.validate(password)?;
                Some(self.crypto_provider.hash_password(password)?)
            }
            None => None,
        };
        let password_changed = password_hash.is_some();
        let phone_number = change.phone_number.map(|p| {
            let trimmed = p.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        let account = self
            .account_store
            .update_credentials(
                account_id,
                CredentialUpdate {
                    username,
                    password_hash,
                    phone_number,
                },
                self.clock.timestamp(),
            )
            .await?;

        if password_changed {
            let closed = self.close_other_sessions(actor, account_id).await?;
            tracing::info!(account_id, sessions_closed = closed, "Password changed");
        }
        tracing::info!(actor = %actor.account.username, account_id, "Account credentials updated");

        Ok(account)
    }

    /// Delete every article and ad after the two-phrase confirmation
    pub async fn purge_all_content(
        &self,
        actor: &AuthenticatedSession,
        first: &str,
        second: &str,
        acknowledged: bool,
    ) -> Result<PurgeReport, InternalError> {
        actor.require_role(Role::Admin)?;
        tracing::warn!(actor = %actor.account.username, "Content purge requested");
        self.content_provider.purge_all_content(first, second, acknowledged).await
    }

    async fn close_other_sessions(&self, actor: &AuthenticatedSession, account_id: &str) -> Result<u64, InternalError> {
        if actor.account.id == account_id {
            // Keep the session that made the change
            self.session_store
                .delete_for_account_except(account_id, &actor.claims.jti)
                .await
        } else {
            self.session_store.delete_for_account(account_id).await
        }
    }
}
