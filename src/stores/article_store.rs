use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::errors::internal::{CatalogueError, DatabaseError};
use crate::errors::InternalError;
use crate::types::db::{article, sponsored_ad};
use crate::types::internal::{Article, ArticleDraft};

/// Category id that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

fn to_active_model(a: Article, created_at: i64) -> article::ActiveModel {
    article::ActiveModel {
        id: Set(a.id),
        title: Set(a.title),
        excerpt: Set(a.excerpt),
        content: Set(a.content),
        category: Set(a.category),
        image: Set(a.image),
        author: Set(a.author),
        published_date: Set(a.published_date),
        read_time: Set(a.read_time),
        featured: Set(a.featured),
        created_at: Set(created_at),
    }
}

/// ArticleStore persists news articles
pub struct ArticleStore {
    db: DatabaseConnection,
}

impl ArticleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List articles, newest first
    ///
    /// # Arguments
    /// * `category` - Category id to filter on; `None` or `"all"` lists everything
    /// * `featured_only` - Restrict to featured articles
    pub async fn list(&self, category: Option<&str>, featured_only: bool) -> Result<Vec<Article>, InternalError> {
        let mut query = article::Entity::find();
        if let Some(category) = category.filter(|c| *c != ALL_CATEGORIES) {
            query = query.filter(article::Column::Category.eq(category));
        }
        if featured_only {
            query = query.filter(article::Column::Featured.eq(true));
        }

        let rows = query
            .order_by_desc(article::Column::CreatedAt)
            .order_by_desc(article::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_articles", e))?;

        Ok(rows.into_iter().map(Article::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Article>, InternalError> {
        Ok(article::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_article", e))?
            .map(Article::from))
    }

    pub async fn insert(&self, article: Article, created_at: i64) -> Result<Article, InternalError> {
        let model = to_active_model(article, created_at)
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_article", e))?;

        Ok(Article::from(model))
    }

    /// Insert a batch of articles in a single transaction
    pub async fn insert_many(&self, articles: Vec<Article>, created_at: i64) -> Result<usize, InternalError> {
        if articles.is_empty() {
            return Ok(0);
        }
        let count = articles.len();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionBegin { source: e }))?;

        article::Entity::insert_many(articles.into_iter().map(|a| to_active_model(a, created_at)))
            .exec_without_returning(&txn)
            .await
            .map_err(|e| InternalError::database("insert_articles", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionCommit { source: e }))?;

        Ok(count)
    }

    /// Overwrite the editable fields of an article in place
    pub async fn update(&self, id: &str, draft: ArticleDraft) -> Result<Article, InternalError> {
        let existing = article::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_article", e))?
            .ok_or_else(|| CatalogueError::ArticleNotFound(id.to_string()))?;

        let mut active = existing.into_active_model();
        active.title = Set(draft.title);
        active.excerpt = Set(draft.excerpt);
        active.content = Set(draft.content);
        active.category = Set(draft.category);
        active.image = Set(draft.image);
        active.author = Set(draft.author);
        active.read_time = Set(draft.read_time);
        active.featured = Set(draft.featured);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_article", e))?;

        Ok(Article::from(model))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, InternalError> {
        let result = article::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_article", e))?;

        Ok(result.rows_affected > 0)
    }

    /// Delete every article and every sponsored ad in one transaction
    ///
    /// Returns the number of articles and ads removed. Nothing is deleted if
    /// either statement fails.
    pub async fn purge_with_ads(&self) -> Result<(u64, u64), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionBegin { source: e }))?;

        let articles = article::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_all_articles", e))?;
        let ads = sponsored_ad::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_all_ads", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionCommit { source: e }))?;

        Ok((articles.rows_affected, ads.rows_affected))
    }
}
