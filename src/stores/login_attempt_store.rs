use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::errors::InternalError;
use crate::types::db::login_attempt;
use crate::types::internal::LoginAttemptState;

/// Persists the failed-attempt counter and lockout expiry per username
pub struct LoginAttemptStore {
    db: DatabaseConnection,
}

impl LoginAttemptStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the stored state, defaulting to a clean slate for unseen usernames
    pub async fn load(&self, username: &str) -> Result<LoginAttemptState, InternalError> {
        let row = login_attempt::Entity::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_login_attempt", e))?;

        Ok(row
            .map(|r| LoginAttemptState {
                failed_attempts: u32::try_from(r.failed_attempts).unwrap_or(0),
                locked_until: r.locked_until,
            })
            .unwrap_or_default())
    }

    pub async fn save(&self, username: &str, state: LoginAttemptState, now: i64) -> Result<(), InternalError> {
        let model = login_attempt::ActiveModel {
            username: Set(username.to_string()),
            failed_attempts: Set(i32::try_from(state.failed_attempts).unwrap_or(i32::MAX)),
            locked_until: Set(state.locked_until),
            updated_at: Set(now),
        };

        login_attempt::Entity::insert(model)
            .on_conflict(
                OnConflict::column(login_attempt::Column::Username)
                    .update_columns([
                        login_attempt::Column::FailedAttempts,
                        login_attempt::Column::LockedUntil,
                        login_attempt::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| InternalError::database("save_login_attempt", e))?;

        Ok(())
    }
}
