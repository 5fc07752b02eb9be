//! Create domains table
//!
//! Mirrors the subset of the billing platform's domain table that the
//! due-date adjuster and the migration hook read and write.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Domains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domains::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Domains::Domain).string().not_null())
                    .col(
                        ColumnDef::new(Domains::Registrar)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Domains::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Domains::NextDueDate).date())
                    .col(ColumnDef::new(Domains::NextInvoiceDate).date())
                    .col(
                        ColumnDef::new(Domains::AdditionalNotes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_domains_status")
                    .table(Domains::Table)
                    .col(Domains::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_domains_next_due_date")
                    .table(Domains::Table)
                    .col(Domains::NextDueDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Domains::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Domains {
    Table,
    Id,
    Domain,
    Registrar,
    Status,
    NextDueDate,
    NextInvoiceDate,
    AdditionalNotes,
}
