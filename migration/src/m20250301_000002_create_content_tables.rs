use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create articles table
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Articles::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Articles::Title).string().not_null())
                    .col(ColumnDef::new(Articles::Excerpt).text().not_null())
                    .col(ColumnDef::new(Articles::Content).text().not_null())
                    .col(ColumnDef::new(Articles::Category).string().not_null())
                    .col(ColumnDef::new(Articles::Image).string().not_null())
                    .col(ColumnDef::new(Articles::Author).string().not_null())
                    .col(ColumnDef::new(Articles::PublishedDate).string().not_null())
                    .col(ColumnDef::new(Articles::ReadTime).string().not_null())
                    .col(ColumnDef::new(Articles::Featured).boolean().not_null().default(false))
                    .col(ColumnDef::new(Articles::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_category")
                    .table(Articles::Table)
                    .col(Articles::Category)
                    .to_owned(),
            )
            .await?;

        // Create sponsored_ads table
        manager
            .create_table(
                Table::create()
                    .table(SponsoredAds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SponsoredAds::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(SponsoredAds::Title).string().not_null())
                    .col(ColumnDef::new(SponsoredAds::Description).text().not_null())
                    .col(ColumnDef::new(SponsoredAds::Image).string().not_null())
                    .col(ColumnDef::new(SponsoredAds::Link).string().null())
                    .col(ColumnDef::new(SponsoredAds::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SponsoredAds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Title,
    Excerpt,
    Content,
    Category,
    Image,
    Author,
    PublishedDate,
    ReadTime,
    Featured,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SponsoredAds {
    Table,
    Id,
    Title,
    Description,
    Image,
    Link,
    CreatedAt,
}
