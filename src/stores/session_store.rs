use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::types::db::session;

/// Server-side session rows backing issued bearer tokens
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        session_id: &str,
        account_id: &str,
        issued_at: i64,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        session::ActiveModel {
            id: Set(session_id.to_string()),
            account_id: Set(account_id.to_string()),
            issued_at: Set(issued_at),
            expires_at: Set(expires_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_session", e))?;

        Ok(())
    }

    pub async fn find(&self, session_id: &str) -> Result<Option<session::Model>, InternalError> {
        session::Entity::find_by_id(session_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_session", e))
    }

    /// Delete one session, returning whether it existed
    pub async fn delete(&self, session_id: &str) -> Result<bool, InternalError> {
        let result = session::Entity::delete_by_id(session_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_session", e))?;

        Ok(result.rows_affected > 0)
    }

    /// Drop every session of an account, used after a password change
    pub async fn delete_for_account(&self, account_id: &str) -> Result<u64, InternalError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::AccountId.eq(account_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_account_sessions", e))?;

        Ok(result.rows_affected)
    }

    /// Drop every session of an account other than `keep_session_id`
    pub async fn delete_for_account_except(&self, account_id: &str, keep_session_id: &str) -> Result<u64, InternalError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::AccountId.eq(account_id))
            .filter(session::Column::Id.ne(keep_session_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_other_sessions", e))?;

        Ok(result.rows_affected)
    }
}
