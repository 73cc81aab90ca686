use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

use crate::api::helpers::non_blank;
use crate::app_data::AppData;
use crate::coordinators::ContentCoordinator;
use crate::errors::ContentError;
use crate::types::dto::content::{AdResponse, ArticleResponse, CategoryResponse, NewspaperResponse};

/// Public site listing: categories, articles, newspaper layout and ads
pub struct CatalogueApi {
    content_coordinator: ContentCoordinator,
}

impl CatalogueApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            content_coordinator: ContentCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum CatalogueTags {
    /// Public articles and sponsored content
    Catalogue,
}

#[OpenApi]
impl CatalogueApi {
    /// List the fixed article categories
    #[oai(path = "/categories", method = "get", tag = "CatalogueTags::Catalogue")]
    async fn categories(&self) -> Json<Vec<CategoryResponse>> {
        Json(
            self.content_coordinator
                .list_categories()
                .iter()
                .map(CategoryResponse::from)
                .collect(),
        )
    }

    /// List articles, newest first
    ///
    /// `category=all` or no category lists everything.
    #[oai(path = "/articles", method = "get", tag = "CatalogueTags::Catalogue")]
    async fn articles(
        &self,
        category: Query<Option<String>>,
        featured: Query<Option<bool>>,
    ) -> Result<Json<Vec<ArticleResponse>>, ContentError> {
        let category = non_blank(category.0);
        let articles = self
            .content_coordinator
            .list_articles(category.as_deref(), featured.0.unwrap_or(false))
            .await?;
        Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
    }

    #[oai(path = "/articles/:id", method = "get", tag = "CatalogueTags::Catalogue")]
    async fn article(&self, id: Path<String>) -> Result<Json<ArticleResponse>, ContentError> {
        let article = self.content_coordinator.get_article(&id.0).await?;
        Ok(Json(ArticleResponse::from(article)))
    }

    /// Articles arranged for the newspaper view
    #[oai(path = "/newspaper", method = "get", tag = "CatalogueTags::Catalogue")]
    async fn newspaper(&self, category: Query<Option<String>>) -> Result<Json<NewspaperResponse>, ContentError> {
        let category = non_blank(category.0);
        let layout = self.content_coordinator.newspaper(category.as_deref()).await?;
        Ok(Json(NewspaperResponse::from(layout)))
    }

    #[oai(path = "/ads", method = "get", tag = "CatalogueTags::Catalogue")]
    async fn ads(&self) -> Result<Json<Vec<AdResponse>>, ContentError> {
        let ads = self.content_coordinator.list_ads().await?;
        Ok(Json(ads.into_iter().map(AdResponse::from).collect()))
    }

    /// Ad shown in a rotation slot; the client advances the slot on its own timer
    #[oai(path = "/ads/slot/:slot", method = "get", tag = "CatalogueTags::Catalogue")]
    async fn ad_for_slot(&self, slot: Path<u64>) -> Result<Json<AdResponse>, ContentError> {
        self.content_coordinator
            .ad_for_slot(slot.0)
            .await?
            .map(|ad| Json(AdResponse::from(ad)))
            .ok_or_else(|| ContentError::not_found("No sponsored ads available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{seed_test_content, setup_test_app};

    #[tokio::test]
    async fn test_articles_filter_by_category() {
        let app = setup_test_app().await;
        seed_test_content(&app.app_data).await;
        let api = CatalogueApi::new(app.app_data.clone());

        let Json(all) = api.articles(Query(None), Query(None)).await.unwrap();
        let Json(finance) = api
            .articles(Query(Some("finance_crypto".to_string())), Query(None))
            .await
            .unwrap();
        let Json(everything) = api
            .articles(Query(Some("all".to_string())), Query(None))
            .await
            .unwrap();

        assert_eq!(all.len(), 6);
        assert_eq!(everything.len(), 6);
        assert_eq!(finance.len(), 2);
        assert!(finance.iter().all(|a| a.category == "finance_crypto"));
        assert!(finance.iter().all(|a| a.category_name == "Finance & Crypto"));
    }

    #[tokio::test]
    async fn test_unknown_article_is_not_found() {
        let app = setup_test_app().await;
        let api = CatalogueApi::new(app.app_data.clone());

        let result = api.article(Path("missing".to_string())).await;

        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ad_slot_without_ads_is_not_found() {
        let app = setup_test_app().await;
        let api = CatalogueApi::new(app.app_data.clone());

        let result = api.ad_for_slot(Path(3)).await;

        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_categories_are_listed() {
        let app = setup_test_app().await;
        let api = CatalogueApi::new(app.app_data.clone());

        let Json(categories) = api.categories().await;

        assert!(categories.iter().any(|c| c.id == "technology_ai" && c.name == "Technology & AI"));
    }
}
