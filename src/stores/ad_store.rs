use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};

use crate::errors::internal::CatalogueError;
use crate::errors::InternalError;
use crate::types::db::sponsored_ad;
use crate::types::internal::{AdDraft, SponsoredAd};

/// AdStore persists sponsored advertisements
pub struct AdStore {
    db: DatabaseConnection,
}

impl AdStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ads in rotation order (oldest first)
    pub async fn list(&self) -> Result<Vec<SponsoredAd>, InternalError> {
        let rows = sponsored_ad::Entity::find()
            .order_by_asc(sponsored_ad::Column::CreatedAt)
            .order_by_asc(sponsored_ad::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_ads", e))?;

        Ok(rows.into_iter().map(SponsoredAd::from).collect())
    }

    pub async fn insert(&self, ad: SponsoredAd, created_at: i64) -> Result<SponsoredAd, InternalError> {
        let model = sponsored_ad::ActiveModel {
            id: Set(ad.id),
            title: Set(ad.title),
            description: Set(ad.description),
            image: Set(ad.image),
            link: Set(ad.link),
            created_at: Set(created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_ad", e))?;

        Ok(SponsoredAd::from(model))
    }

    pub async fn update(&self, id: &str, draft: AdDraft) -> Result<SponsoredAd, InternalError> {
        let existing = sponsored_ad::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_ad", e))?
            .ok_or_else(|| CatalogueError::AdNotFound(id.to_string()))?;

        let mut active = existing.into_active_model();
        active.title = Set(draft.title);
        active.description = Set(draft.description);
        active.image = Set(draft.image);
        active.link = Set(draft.link);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_ad", e))?;

        Ok(SponsoredAd::from(model))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, InternalError> {
        let result = sponsored_ad::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_ad", e))?;

        Ok(result.rows_affected > 0)
    }
}
