use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single-row table: the whole portfolio lives in one jsonb document
        // under a fixed key.
        manager
            .create_table(
                Table::create()
                    .table(PortfolioDocument::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioDocument::Key)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioDocument::Data)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioDocument::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioDocument::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PortfolioDocument {
    Table,
    Key,
    Data,
    UpdatedAt,
}
