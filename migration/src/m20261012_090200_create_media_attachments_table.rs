//! # Media Attachments Table Migration
//!
//! One row per file attached to a portfolio record. `target` names the kind
//! of parent (for now only `professional_experience`) and `parent_id` its id.
//! There is no foreign key on `parent_id` since it points to different tables
//! depending on `target`. Attachments of a soft-deleted parent stay in place
//! and are hidden along with it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaAttachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::Target)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MediaAttachments::ParentId).uuid().not_null())
                    .col(
                        ColumnDef::new(MediaAttachments::ObjectKey)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::OriginalName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::MimeType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::SizeBytes)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Primary lookup: "get all media for this record"
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_media_attachments_parent
                ON media_attachments (target, parent_id, created_at);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_media_attachments_parent;")
            .await?;

        manager
            .drop_table(Table::drop().table(MediaAttachments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MediaAttachments {
    Table,
    Id,
    Slug,
    Target,
    ParentId,
    ObjectKey,
    OriginalName,
    MimeType,
    SizeBytes,
    CreatedAt,
}
