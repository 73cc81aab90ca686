use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::internal::{CredentialError, DatabaseError};
use crate::errors::InternalError;
use crate::types::db::{account, credential};
use crate::types::internal::{Account, Role};

/// Field changes applied by [`AccountStore::update_credentials`]
///
/// `None` leaves the stored value untouched. The phone number uses a nested
/// option so callers can clear it.
#[derive(Debug, Default, Clone)]
pub struct CredentialUpdate {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub phone_number: Option<Option<String>>,
}

/// AccountStore manages account records and their password hashes
///
/// Password hashes live in `credentials`, keyed by username, so a rename
/// moves the credential row inside the same transaction.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert an account together with its credential row
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(InternalError)` - DuplicateUsername if the username is taken, or a database error
    pub async fn create_account(
        &self,
        username: &str,
        role: Role,
        phone_number: Option<String>,
        password_hash: String,
        now: i64,
    ) -> Result<Account, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionBegin { source: e }))?;

        let existing = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_account_by_username", e))?;
        if existing.is_some() {
            return Err(CredentialError::DuplicateUsername(username.to_string()).into());
        }

        let model = account::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            role: Set(role.as_str().to_string()),
            phone_number: Set(phone_number),
            last_login: Set(None),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| InternalError::database("insert_account", e))?;

        credential::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| InternalError::database("insert_credential", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionCommit { source: e }))?;

        Account::try_from(model)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Account>, InternalError> {
        account::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_account_by_id", e))?
            .map(Account::try_from)
            .transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, InternalError> {
        account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_account_by_username", e))?
            .map(Account::try_from)
            .transpose()
    }

    pub async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, InternalError> {
        account::Entity::find()
            .filter(account::Column::PhoneNumber.eq(phone_number))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_account_by_phone", e))?
            .map(Account::try_from)
            .transpose()
    }

    /// All accounts ordered by username
    pub async fn list_accounts(&self) -> Result<Vec<Account>, InternalError> {
        account::Entity::find()
            .order_by_asc(account::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_accounts", e))?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    pub async fn count_accounts(&self) -> Result<u64, InternalError> {
        account::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_accounts", e))
    }

    /// Stored password hash for a username, if any
    pub async fn password_hash(&self, username: &str) -> Result<Option<String>, InternalError> {
        Ok(credential::Entity::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_credential", e))?
            .map(|c| c.password_hash))
    }

    /// Replace the password hash stored for a username
    pub async fn set_password_hash(&self, username: &str, password_hash: String, now: i64) -> Result<(), InternalError> {
        let existing = credential::Entity::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_credential", e))?
            .ok_or_else(|| CredentialError::AccountNotFound(username.to_string()))?;

        let mut active = existing.into_active_model();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(now);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_credential", e))?;

        Ok(())
    }

    pub async fn record_login(&self, account_id: &str, now: i64) -> Result<(), InternalError> {
        let existing = account::Entity::find_by_id(account_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_account_by_id", e))?
            .ok_or_else(|| CredentialError::AccountNotFound(account_id.to_string()))?;

        let mut active = existing.into_active_model();
        active.last_login = Set(Some(now));
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("record_login", e))?;

        Ok(())
    }

    /// Apply a credential update to one account
    ///
    /// A new username must not belong to another account. When the username
    /// changes the credential row is re-keyed, carrying the old hash unless a
    /// new one is supplied.
    pub async fn update_credentials(
        &self,
        account_id: &str,
        update: CredentialUpdate,
        now: i64,
    ) -> Result<Account, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionBegin { source: e }))?;

        let existing = account::Entity::find_by_id(account_id.to_string())
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_account_by_id", e))?
            .ok_or_else(|| CredentialError::AccountNotFound(account_id.to_string()))?;
        let old_username = existing.username.clone();

        let new_username = match update.username {
            Some(name) if name != old_username => {
                let taken = account::Entity::find()
                    .filter(account::Column::Username.eq(name.as_str()))
                    .filter(account::Column::Id.ne(account_id))
                    .one(&txn)
                    .await
                    .map_err(|e| InternalError::database("find_account_by_username", e))?;
                if taken.is_some() {
                    return Err(CredentialError::DuplicateUsername(name).into());
                }
                Some(name)
            }
            _ => None,
        };

        let stored = credential::Entity::find_by_id(old_username.clone())
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_credential", e))?;

        let mut active = existing.into_active_model();
        if let Some(name) = &new_username {
            active.username = Set(name.clone());
        }
        if let Some(phone) = update.phone_number {
            active.phone_number = Set(phone);
        }
        let model = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("update_account", e))?;

        match (new_username, stored) {
            (Some(name), stored) => {
                let password_hash = match (update.password_hash, &stored) {
                    (Some(hash), _) => hash,
                    (None, Some(c)) => c.password_hash.clone(),
                    (None, None) => return Err(CredentialError::AccountNotFound(old_username).into()),
                };
                if let Some(c) = stored {
                    c.delete(&txn)
                        .await
                        .map_err(|e| InternalError::database("delete_credential", e))?;
                }
                credential::ActiveModel {
                    username: Set(name),
                    password_hash: Set(password_hash),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await
                .map_err(|e| InternalError::database("insert_credential", e))?;
            }
            (None, Some(c)) => {
                if let Some(hash) = update.password_hash {
                    let mut active = c.into_active_model();
                    active.password_hash = Set(hash);
                    active.updated_at = Set(now);
                    active
                        .update(&txn)
                        .await
                        .map_err(|e| InternalError::database("update_credential", e))?;
                }
            }
            (None, None) => {
                if let Some(hash) = update.password_hash {
                    credential::ActiveModel {
                        username: Set(old_username),
                        password_hash: Set(hash),
                        updated_at: Set(now),
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| InternalError::database("insert_credential", e))?;
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::Database(DatabaseError::TransactionCommit { source: e }))?;

        Account::try_from(model)
    }
}
