use serde::{Deserialize, Serialize};

use crate::types::db::{article, sponsored_ad};

/// Category reference entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Optional style tag used by clients to color badges
    pub style: Option<&'static str>,
}

/// News article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub author: String,
    /// `YYYY-MM-DD`
    pub published_date: String,
    pub read_time: String,
    pub featured: bool,
}

impl From<article::Model> for Article {
    fn from(m: article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            excerpt: m.excerpt,
            content: m.content,
            category: m.category,
            image: m.image,
            author: m.author,
            published_date: m.published_date,
            read_time: m.read_time,
            featured: m.featured,
        }
    }
}

/// Editable article fields, shared by create and update
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub author: String,
    pub read_time: String,
    pub featured: bool,
}

impl ArticleDraft {
    /// Required fields paired with their names, in form order
    pub fn required_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("title", self.title.as_str()),
            ("excerpt", self.excerpt.as_str()),
            ("content", self.content.as_str()),
            ("category", self.category.as_str()),
            ("image", self.image.as_str()),
            ("author", self.author.as_str()),
            ("readTime", self.read_time.as_str()),
        ]
    }
}

/// Sponsored advertisement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsoredAd {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: Option<String>,
}

impl From<sponsored_ad::Model> for SponsoredAd {
    fn from(m: sponsored_ad::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image: m.image,
            link: m.link,
        }
    }
}

/// Editable ad fields, shared by create and update
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: Option<String>,
}

/// Articles arranged for the newspaper reading view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewspaperLayout {
    /// At most two featured articles shown above the fold
    pub leads: Vec<Article>,
    /// Featured articles that did not fit in the lead slots
    pub features: Vec<Article>,
    /// Everything else, newest first
    pub columns: Vec<Article>,
}
