use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::coordinators::CredentialChange;
use crate::providers::bulk_import::ImportReport;
use crate::providers::PurgeReport;
use crate::types::dto::content::ArticleResponse;

/// Bulk import upload
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Original file name; must end in `.csv`
    pub file_name: String,

    /// File contents (UTF-8)
    pub content: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Number of articles stored
    pub success: u32,

    pub articles: Vec<ArticleResponse>,

    /// `Row N: ...` per rejected row, or one batch-level message
    pub errors: Vec<String>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            success: u32::try_from(report.accepted.len()).unwrap_or(u32::MAX),
            articles: report.accepted.into_iter().map(ArticleResponse::from).collect(),
            errors: report.errors,
        }
    }
}

/// Credential update; omitted fields are left unchanged
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateCredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Empty string clears the phone number
    pub phone_number: Option<String>,
}

impl From<UpdateCredentialsRequest> for CredentialChange {
    fn from(r: UpdateCredentialsRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
            phone_number: r.phone_number,
        }
    }
}

/// Purge confirmation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PurgeRequest {
    /// Must be exactly `DELETE ALL CONTENT`
    pub confirmation: String,

    /// Must be exactly `CONFIRM DELETE`
    pub final_confirmation: String,

    /// Final acknowledgement that there is no undo
    pub acknowledged: bool,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub articles_deleted: u64,
    pub ads_deleted: u64,
}

impl From<PurgeReport> for PurgeResponse {
    fn from(report: PurgeReport) -> Self {
        Self {
            articles_deleted: report.articles_deleted,
            ads_deleted: report.ads_deleted,
        }
    }
}
