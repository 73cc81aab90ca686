use std::sync::Arc;

use crate::app_data::AppData;
use crate::data::CATEGORIES;
use crate::errors::InternalError;
use crate::providers::ContentProvider;
use crate::types::internal::{Article, Category, NewspaperLayout, SponsoredAd};

/// Read-only site listing: categories, articles, newspaper layout and ads
pub struct ContentCoordinator {
    content_provider: Arc<ContentProvider>,
}

impl ContentCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            content_provider: Arc::clone(&app_data.content_provider),
        }
    }

    pub fn list_categories(&self) -> &'static [Category] {
        &CATEGORIES
    }

    pub async fn list_articles(&self, category: Option<&str>, featured_only: bool) -> Result<Vec<Article>, InternalError> {
        self.content_provider.list_articles(category, featured_only).await
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, InternalError> {
        self.content_provider.get_article(id).await
    }

    pub async fn newspaper(&self, category: Option<&str>) -> Result<NewspaperLayout, InternalError> {
        self.content_provider.newspaper(category).await
    }

    pub async fn list_ads(&self) -> Result<Vec<SponsoredAd>, InternalError> {
        self.content_provider.list_ads().await
    }

    pub async fn ad_for_slot(&self, slot: u64) -> Result<Option<SponsoredAd>, InternalError> {
        self.content_provider.ad_for_slot(slot).await
    }
}
