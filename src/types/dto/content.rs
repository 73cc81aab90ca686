use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::data::category_name;
use crate::types::internal::{AdDraft, Article, ArticleDraft, Category, NewspaperLayout, SponsoredAd};

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    /// Badge color hint
    pub style: Option<String>,
}

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.to_string(),
            style: c.style.map(str::to_string),
        }
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    /// Display name of `category`, blank when the id is unknown
    pub category_name: String,
    pub image: String,
    pub author: String,
    /// `YYYY-MM-DD`
    pub published_date: String,
    pub read_time: String,
    pub featured: bool,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            category_name: category_name(&a.category).to_string(),
            id: a.id,
            title: a.title,
            excerpt: a.excerpt,
            content: a.content,
            category: a.category,
            image: a.image,
            author: a.author,
            published_date: a.published_date,
            read_time: a.read_time,
            featured: a.featured,
        }
    }
}

/// Editable article fields
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub author: String,
    pub read_time: String,
    #[oai(default)]
    #[serde(default)]
    pub featured: bool,
}

impl From<ArticleRequest> for ArticleDraft {
    fn from(r: ArticleRequest) -> Self {
        Self {
            title: r.title,
            excerpt: r.excerpt,
            content: r.content,
            category: r.category,
            image: r.image,
            author: r.author,
            read_time: r.read_time,
            featured: r.featured,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct NewspaperResponse {
    /// Up to two featured articles
    pub leads: Vec<ArticleResponse>,
    /// Remaining featured articles
    pub features: Vec<ArticleResponse>,
    /// Non-featured articles
    pub columns: Vec<ArticleResponse>,
}

impl From<NewspaperLayout> for NewspaperResponse {
    fn from(layout: NewspaperLayout) -> Self {
        let convert = |v: Vec<Article>| v.into_iter().map(ArticleResponse::from).collect();
        Self {
            leads: convert(layout.leads),
            features: convert(layout.features),
            columns: convert(layout.columns),
        }
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AdResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: Option<String>,
}

impl From<SponsoredAd> for AdResponse {
    fn from(ad: SponsoredAd) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            image: ad.image,
            link: ad.link,
        }
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AdRequest {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: Option<String>,
}

impl From<AdRequest> for AdDraft {
    fn from(r: AdRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            image: r.image,
            link: r.link,
        }
    }
}
