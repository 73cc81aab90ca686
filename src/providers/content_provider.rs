use rand::Rng;
use std::sync::Arc;
use url::Url;

use crate::data::is_known_category;
use crate::errors::internal::CatalogueError;
use crate::errors::InternalError;
use crate::providers::clock::Clock;
use crate::stores::{AdStore, ArticleStore};
use crate::types::internal::{AdDraft, Article, ArticleDraft, NewspaperLayout, SponsoredAd};

/// First confirmation phrase for a purge
pub const PURGE_PHRASE: &str = "DELETE ALL CONTENT";
/// Second confirmation phrase for a purge
pub const PURGE_CONFIRMATION: &str = "CONFIRM DELETE";

/// Number of featured articles shown above the fold
const LEAD_SLOTS: usize = 2;

/// Rows removed by a purge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurgeReport {
    pub articles_deleted: u64,
    pub ads_deleted: u64,
}

fn require(field: &str, value: &str) -> Result<(), InternalError> {
    if value.trim().is_empty() {
        return Err(CatalogueError::MissingField(field.to_string()).into());
    }
    Ok(())
}

fn require_image_url(image: &str) -> Result<(), InternalError> {
    Url::parse(image).map_err(|_| CatalogueError::InvalidImageUrl(image.to_string()))?;
    Ok(())
}

/// Check a manual article draft before it is stored
pub fn validate_article_draft(draft: &ArticleDraft) -> Result<(), InternalError> {
    for (field, value) in draft.required_fields() {
        require(field, value)?;
    }
    if !is_known_category(&draft.category) {
        return Err(CatalogueError::InvalidCategory(draft.category.clone()).into());
    }
    require_image_url(&draft.image)
}

/// Check a sponsored ad draft before it is stored
pub fn validate_ad_draft(draft: &AdDraft) -> Result<(), InternalError> {
    require("title", &draft.title)?;
    require("description", &draft.description)?;
    require("image", &draft.image)?;
    require_image_url(&draft.image)
}

/// Arrange articles (already newest first) for the newspaper view
pub fn arrange_newspaper(articles: Vec<Article>) -> NewspaperLayout {
    let (featured, columns): (Vec<Article>, Vec<Article>) = articles.into_iter().partition(|a| a.featured);
    let mut leads = featured;
    let features = if leads.len() > LEAD_SLOTS {
        leads.split_off(LEAD_SLOTS)
    } else {
        Vec::new()
    };

    NewspaperLayout {
        leads,
        features,
        columns,
    }
}

/// Pick the ad shown in rotation slot `slot`
pub fn pick_ad(ads: &[SponsoredAd], slot: u64) -> Option<&SponsoredAd> {
    if ads.is_empty() {
        return None;
    }
    let index = usize::try_from(slot % ads.len() as u64).unwrap_or(0);
    ads.get(index)
}

/// Article and sponsored ad catalogue
pub struct ContentProvider {
    article_store: Arc<ArticleStore>,
    ad_store: Arc<AdStore>,
    clock: Arc<dyn Clock>,
}

impl ContentProvider {
    pub fn new(article_store: Arc<ArticleStore>, ad_store: Arc<AdStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            article_store,
            ad_store,
            clock,
        }
    }

    /// Timestamp-derived id with a random suffix so two creates in the same
    /// millisecond do not collide
    fn new_id(&self) -> String {
        let suffix: u16 = rand::rng().random_range(0..10_000);
        format!("{}-{:04}", self.clock.now().timestamp_millis(), suffix)
    }

    pub async fn list_articles(&self, category: Option<&str>, featured_only: bool) -> Result<Vec<Article>, InternalError> {
        self.article_store.list(category, featured_only).await
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, InternalError> {
        self.article_store
            .get(id)
            .await?
            .ok_or_else(|| CatalogueError::ArticleNotFound(id.to_string()).into())
    }

    pub async fn create_article(&self, draft: ArticleDraft) -> Result<Article, InternalError> {
        validate_article_draft(&draft)?;
        let now = self.clock.now();

        let article = Article {
            id: self.new_id(),
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            image: draft.image,
            author: draft.author,
            published_date: now.format("%Y-%m-%d").to_string(),
            read_time: draft.read_time,
            featured: draft.featured,
        };

        let article = self.article_store.insert(article, now.timestamp()).await?;
        tracing::info!(article_id = %article.id, "Article created");
        Ok(article)
    }

    pub async fn update_article(&self, id: &str, draft: ArticleDraft) -> Result<Article, InternalError> {
        validate_article_draft(&draft)?;
        let article = self.article_store.update(id, draft).await?;
        tracing::info!(article_id = %article.id, "Article updated");
        Ok(article)
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), InternalError> {
        if !self.article_store.delete(id).await? {
            return Err(CatalogueError::ArticleNotFound(id.to_string()).into());
        }
        tracing::info!(article_id = id, "Article deleted");
        Ok(())
    }

    /// Store a batch of already validated articles
    pub async fn store_imported(&self, articles: Vec<Article>) -> Result<usize, InternalError> {
        self.store_imported_at(articles, self.clock.timestamp()).await
    }

    /// Store validated articles with an explicit creation time, which decides
    /// where they sort in listings
    pub async fn store_imported_at(&self, articles: Vec<Article>, created_at: i64) -> Result<usize, InternalError> {
        let count = self.article_store.insert_many(articles, created_at).await?;
        tracing::debug!(count, "Imported articles stored");
        Ok(count)
    }

    pub async fn newspaper(&self, category: Option<&str>) -> Result<NewspaperLayout, InternalError> {
        let articles = self.article_store.list(category, false).await?;
        Ok(arrange_newspaper(articles))
    }

    pub async fn list_ads(&self) -> Result<Vec<SponsoredAd>, InternalError> {
        self.ad_store.list().await
    }

    pub async fn ad_for_slot(&self, slot: u64) -> Result<Option<SponsoredAd>, InternalError> {
        let ads = self.ad_store.list().await?;
        Ok(pick_ad(&ads, slot).cloned())
    }

    pub async fn create_ad(&self, draft: AdDraft) -> Result<SponsoredAd, InternalError> {
        validate_ad_draft(&draft)?;

        let ad = SponsoredAd {
            id: self.new_id(),
            title: draft.title,
            description: draft.description,
            image: draft.image,
            link: draft.link.filter(|l| !l.trim().is_empty()),
        };

        let ad = self.ad_store.insert(ad, self.clock.timestamp()).await?;
        tracing::info!(ad_id = %ad.id, "Sponsored ad created");
        Ok(ad)
    }

    /// Store an ad that already carries its id, as seed data does
    pub async fn store_ad(&self, ad: SponsoredAd) -> Result<SponsoredAd, InternalError> {
        self.ad_store.insert(ad, self.clock.timestamp()).await
    }

    pub async fn update_ad(&self, id: &str, mut draft: AdDraft) -> Result<SponsoredAd, InternalError> {
        validate_ad_draft(&draft)?;
        draft.link = draft.link.filter(|l| !l.trim().is_empty());
        let ad = self.ad_store.update(id, draft).await?;
        tracing::info!(ad_id = %ad.id, "Sponsored ad updated");
        Ok(ad)
    }

    pub async fn delete_ad(&self, id: &str) -> Result<(), InternalError> {
        if !self.ad_store.delete(id).await? {
            return Err(CatalogueError::AdNotFound(id.to_string()).into());
        }
        tracing::info!(ad_id = id, "Sponsored ad deleted");
        Ok(())
    }

    /// Delete every article and ad
    ///
    /// Both phrases must match exactly and the acknowledgement must be set.
    /// There is no undo.
    pub async fn purge_all_content(
        &self,
        first: &str,
        second: &str,
        acknowledged: bool,
    ) -> Result<PurgeReport, InternalError> {
        if first != PURGE_PHRASE {
            return Err(CatalogueError::PurgeNotConfirmed(format!("type \"{}\" to continue", PURGE_PHRASE)).into());
        }
        if second != PURGE_CONFIRMATION {
            return Err(
                CatalogueError::PurgeNotConfirmed(format!("type \"{}\" to continue", PURGE_CONFIRMATION)).into(),
            );
        }
        if !acknowledged {
            return Err(CatalogueError::PurgeNotConfirmed("final acknowledgement not given".to_string()).into());
        }

        let (articles_deleted, ads_deleted) = self.article_store.purge_with_ads().await?;
        let report = PurgeReport {
            articles_deleted,
            ads_deleted,
        };
        tracing::warn!(
            articles = report.articles_deleted,
            ads = report.ads_deleted,
            "All content purged"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, featured: bool) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Title {}", id),
            excerpt: "Excerpt".to_string(),
            content: "Content".to_string(),
            category: "regional".to_string(),
            image: "https://example.com/a.jpg".to_string(),
            author: "Ann".to_string(),
            published_date: "2024-01-01".to_string(),
            read_time: "2 min read".to_string(),
            featured,
        }
    }

    fn ad(id: &str) -> SponsoredAd {
        SponsoredAd {
            id: id.to_string(),
            title: id.to_string(),
            description: "Description".to_string(),
            image: "https://example.com/ad.jpg".to_string(),
            link: None,
        }
    }

    fn draft() -> ArticleDraft {
        ArticleDraft {
            title: "Title".to_string(),
            excerpt: "Excerpt".to_string(),
            content: "Content".to_string(),
            category: "green_tech".to_string(),
            image: "https://example.com/a.jpg".to_string(),
            author: "Ann".to_string(),
            read_time: "4 min read".to_string(),
            featured: false,
        }
    }

    #[test]
    fn test_newspaper_puts_first_two_featured_in_leads() {
        let layout = arrange_newspaper(vec![
            article("1", false),
            article("2", true),
            article("3", true),
            article("4", true),
            article("5", false),
        ]);

        let ids = |v: &[Article]| v.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&layout.leads), vec!["2", "3"]);
        assert_eq!(ids(&layout.features), vec!["4"]);
        assert_eq!(ids(&layout.columns), vec!["1", "5"]);
    }

    #[test]
    fn test_newspaper_with_one_featured_has_no_extra_features() {
        let layout = arrange_newspaper(vec![article("1", true), article("2", false)]);

        assert_eq!(layout.leads.len(), 1);
        assert!(layout.features.is_empty());
        assert_eq!(layout.columns.len(), 1);
    }

    #[test]
    fn test_ad_slot_wraps_around() {
        let ads = vec![ad("ad1"), ad("ad2"), ad("ad3")];

        assert_eq!(pick_ad(&ads, 0).map(|a| a.id.as_str()), Some("ad1"));
        assert_eq!(pick_ad(&ads, 4).map(|a| a.id.as_str()), Some("ad2"));
        assert!(pick_ad(&[], 7).is_none());
    }

    #[test]
    fn test_article_draft_requires_every_field() {
        let mut blank = draft();
        blank.read_time = "  ".to_string();

        let err = validate_article_draft(&blank).unwrap_err();

        assert_eq!(err.to_string(), "Missing value for readTime");
    }

    #[test]
    fn test_article_draft_rejects_unknown_category() {
        let mut bad = draft();
        bad.category = "all".to_string();

        assert!(matches!(
            validate_article_draft(&bad),
            Err(InternalError::Catalogue(CatalogueError::InvalidCategory(_)))
        ));
    }

    #[test]
    fn test_ad_draft_link_is_optional() {
        let draft = AdDraft {
            title: "Ad".to_string(),
            description: "Words".to_string(),
            image: "https://example.com/ad.png".to_string(),
            link: None,
        };

        assert!(validate_ad_draft(&draft).is_ok());
    }

    #[test]
    fn test_ad_draft_requires_description() {
        let draft = AdDraft {
            title: "Ad".to_string(),
            description: String::new(),
            image: "https://example.com/ad.png".to_string(),
            link: None,
        };

        assert_eq!(
            validate_ad_draft(&draft).unwrap_err().to_string(),
            "Missing value for description"
        );
    }
}
