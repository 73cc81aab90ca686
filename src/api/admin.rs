use poem_openapi::{
    param::Path,
    payload::{Json, PlainText},
    ApiResponse, OpenApi, Tags,
};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::api::helpers::require_session;
use crate::app_data::AppData;
use crate::coordinators::{AdminCoordinator, AuthCoordinator};
use crate::errors::AdminError;
use crate::providers::bulk_import::TEMPLATE_FILE_NAME;
use crate::types::dto::admin::{ImportRequest, ImportResponse, PurgeRequest, PurgeResponse, UpdateCredentialsRequest};
use crate::types::dto::auth::AccountResponse;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::content::{AdRequest, AdResponse, ArticleRequest, ArticleResponse};

/// Admin panel API endpoints; every route needs a bearer session
pub struct AdminApi {
    auth_coordinator: AuthCoordinator,
    admin_coordinator: AdminCoordinator,
}

impl AdminApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(Arc::clone(&app_data)),
            admin_coordinator: AdminCoordinator::new(app_data),
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Article and ad editing
    Content,
    /// Account management
    Accounts,
    /// Destructive data operations
    Data,
}

/// CSV template download
#[derive(ApiResponse)]
pub enum TemplateResponse {
    #[oai(status = 200)]
    Ok(
        PlainText<String>,
        #[oai(header = "Content-Disposition")] String,
    ),
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    #[oai(path = "/articles", method = "post", tag = "AdminTags::Content")]
    async fn create_article(
        &self,
        auth: BearerAuth,
        body: Json<ArticleRequest>,
    ) -> Result<Json<ArticleResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let article = self.admin_coordinator.create_article(&session, body.0.into()).await?;
        Ok(Json(ArticleResponse::from(article)))
    }

    #[oai(path = "/articles/:id", method = "put", tag = "AdminTags::Content")]
    async fn update_article(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<ArticleRequest>,
    ) -> Result<Json<ArticleResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let article = self
            .admin_coordinator
            .update_article(&session, &id.0, body.0.into())
            .await?;
        Ok(Json(ArticleResponse::from(article)))
    }

    #[oai(path = "/articles/:id", method = "delete", tag = "AdminTags::Content")]
    async fn delete_article(&self, auth: BearerAuth, id: Path<String>) -> Result<Json<MessageResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        self.admin_coordinator.delete_article(&session, &id.0).await?;
        Ok(Json(MessageResponse::new("Article deleted")))
    }

    /// Bulk import articles from a CSV file
    ///
    /// Valid rows are stored even when other rows fail; every rejected row is
    /// listed in `errors`.
    #[oai(path = "/articles/import", method = "post", tag = "AdminTags::Content")]
    async fn import_articles(
        &self,
        auth: BearerAuth,
        body: Json<ImportRequest>,
    ) -> Result<Json<ImportResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let report = self
            .admin_coordinator
            .import_articles(&session, &body.file_name, &body.content)
            .await?;
        Ok(Json(ImportResponse::from(report)))
    }

    #[oai(path = "/articles/import/template", method = "get", tag = "AdminTags::Content")]
    async fn import_template(&self, auth: BearerAuth) -> Result<TemplateResponse, AdminError> {
        require_session(&self.auth_coordinator, &auth).await?;
        Ok(TemplateResponse::Ok(
            PlainText(self.admin_coordinator.import_template().to_string()),
            format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
        ))
    }

    #[oai(path = "/ads", method = "post", tag = "AdminTags::Content")]
    async fn create_ad(&self, auth: BearerAuth, body: Json<AdRequest>) -> Result<Json<AdResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let ad = self.admin_coordinator.create_ad(&session, body.0.into()).await?;
        Ok(Json(AdResponse::from(ad)))
    }

    #[oai(path = "/ads/:id", method = "put", tag = "AdminTags::Content")]
    async fn update_ad(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<AdRequest>,
    ) -> Result<Json<AdResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let ad = self.admin_coordinator.update_ad(&session, &id.0, body.0.into()).await?;
        Ok(Json(AdResponse::from(ad)))
    }

    #[oai(path = "/ads/:id", method = "delete", tag = "AdminTags::Content")]
    async fn delete_ad(&self, auth: BearerAuth, id: Path<String>) -> Result<Json<MessageResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        self.admin_coordinator.delete_ad(&session, &id.0).await?;
        Ok(Json(MessageResponse::new("Ad deleted")))
    }

    /// List all accounts (admin only)
    #[oai(path = "/accounts", method = "get", tag = "AdminTags::Accounts")]
    async fn list_accounts(&self, auth: BearerAuth) -> Result<Json<Vec<AccountResponse>>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let accounts = self.admin_coordinator.list_accounts(&session).await?;
        Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
    }

    /// Update username, password or phone number
    ///
    /// Editors may only update their own account.
    #[oai(path = "/accounts/:id", method = "put", tag = "AdminTags::Accounts")]
    async fn update_credentials(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateCredentialsRequest>,
    ) -> Result<Json<AccountResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let account = self
            .admin_coordinator
            .update_credentials(&session, &id.0, body.0.into())
            .await?;
        Ok(Json(AccountResponse::from(account)))
    }

    /// Delete every article and ad (admin only, no undo)
    #[oai(path = "/data/purge", method = "post", tag = "AdminTags::Data")]
    async fn purge(&self, auth: BearerAuth, body: Json<PurgeRequest>) -> Result<Json<PurgeResponse>, AdminError> {
        let session = require_session(&self.auth_coordinator, &auth).await?;
        let report = self
            .admin_coordinator
            .purge_all_content(&session, &body.confirmation, &body.final_confirmation, body.acknowledged)
            .await?;
        Ok(Json(PurgeResponse::from(report)))
    }
}
