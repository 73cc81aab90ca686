use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::types::db::one_time_code;

/// One outstanding one-time code per phone number
///
/// The stored `code` is a keyed digest, never the digits sent to the user.
pub struct OtpStore {
    db: DatabaseConnection,
}

impl OtpStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a code, replacing any unconsumed code for the same number
    pub async fn put(
        &self,
        phone_number: &str,
        code_digest: String,
        purpose: &str,
        expires_at: i64,
        now: i64,
    ) -> Result<(), InternalError> {
        let model = one_time_code::ActiveModel {
            phone_number: Set(phone_number.to_string()),
            code: Set(code_digest),
            purpose: Set(purpose.to_string()),
            expires_at: Set(expires_at),
            failed_checks: Set(0),
            created_at: Set(now),
        };

        one_time_code::Entity::insert(model)
            .on_conflict(
                OnConflict::column(one_time_code::Column::PhoneNumber)
                    .update_columns([
                        one_time_code::Column::Code,
                        one_time_code::Column::Purpose,
                        one_time_code::Column::ExpiresAt,
                        one_time_code::Column::FailedChecks,
                        one_time_code::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| InternalError::database("put_one_time_code", e))?;

        Ok(())
    }

    pub async fn find(&self, phone_number: &str) -> Result<Option<one_time_code::Model>, InternalError> {
        one_time_code::Entity::find_by_id(phone_number.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_one_time_code", e))
    }

    /// Count a wrong guess against the outstanding code
    pub async fn record_failed_check(&self, phone_number: &str) -> Result<(), InternalError> {
        one_time_code::Entity::update_many()
            .col_expr(
                one_time_code::Column::FailedChecks,
                Expr::col(one_time_code::Column::FailedChecks).add(1),
            )
            .filter(one_time_code::Column::PhoneNumber.eq(phone_number))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("record_failed_code_check", e))?;

        Ok(())
    }

    /// Delete the code for a number, returning whether one existed
    pub async fn delete(&self, phone_number: &str) -> Result<bool, InternalError> {
        let result = one_time_code::Entity::delete_by_id(phone_number.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_one_time_code", e))?;

        Ok(result.rows_affected > 0)
    }
}
