use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Accounts::Role).string().not_null())
                    .col(ColumnDef::new(Accounts::PhoneNumber).string().null())
                    .col(ColumnDef::new(Accounts::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Accounts::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_phone_number")
                    .table(Accounts::Table)
                    .col(Accounts::PhoneNumber)
                    .to_owned(),
            )
            .await?;

        // Password hashes live apart from the account record, keyed by username
        manager
            .create_table(
                Table::create()
                    .table(Credentials::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Credentials::Username).string().not_null().primary_key())
                    .col(ColumnDef::new(Credentials::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Credentials::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create login_attempts table
        manager
            .create_table(
                Table::create()
                    .table(LoginAttempts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LoginAttempts::Username).string().not_null().primary_key())
                    .col(ColumnDef::new(LoginAttempts::FailedAttempts).integer().not_null().default(0))
                    .col(ColumnDef::new(LoginAttempts::LockedUntil).big_integer().null())
                    .col(ColumnDef::new(LoginAttempts::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // One outstanding code per phone number
        manager
            .create_table(
                Table::create()
                    .table(OneTimeCodes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OneTimeCodes::PhoneNumber).string().not_null().primary_key())
                    .col(ColumnDef::new(OneTimeCodes::Code).string().not_null())
                    .col(ColumnDef::new(OneTimeCodes::Purpose).string().not_null())
                    .col(ColumnDef::new(OneTimeCodes::ExpiresAt).big_integer().not_null())
                    .col(ColumnDef::new(OneTimeCodes::FailedChecks).integer().not_null().default(0))
                    .col(ColumnDef::new(OneTimeCodes::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create sessions table
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::AccountId).string().not_null())
                    .col(ColumnDef::new(Sessions::IssuedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sessions::ExpiresAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_account_id")
                            .from(Sessions::Table, Sessions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_account_id")
                    .table(Sessions::Table)
                    .col(Sessions::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OneTimeCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LoginAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Credentials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Username,
    Role,
    PhoneNumber,
    LastLogin,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Credentials {
    Table,
    Username,
    PasswordHash,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LoginAttempts {
    Table,
    Username,
    FailedAttempts,
    LockedUntil,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OneTimeCodes {
    Table,
    PhoneNumber,
    Code,
    Purpose,
    ExpiresAt,
    FailedChecks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    AccountId,
    IssuedAt,
    ExpiresAt,
}
