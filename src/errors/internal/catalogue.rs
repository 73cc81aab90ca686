use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Sponsored ad not found: {0}")]
    AdNotFound(String),

    #[error("Missing value for {0}")]
    MissingField(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(String),

    #[error("Purge not confirmed: {0}")]
    PurgeNotConfirmed(String),
}
