use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfessionalExperiences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfessionalExperiences::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::Company)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ProfessionalExperiences::CompanyImage).string_len(500))
                    .col(ColumnDef::new(ProfessionalExperiences::CompanyUrl).string_len(255))
                    .col(ColumnDef::new(ProfessionalExperiences::Address).string_len(255))
                    .col(
                        ColumnDef::new(ProfessionalExperiences::Designation)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::JobType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProfessionalExperiences::EndDate).date())
                    .col(
                        ColumnDef::new(ProfessionalExperiences::CurrentlyWorking)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ProfessionalExperiences::Description).text())
                    .col(
                        ColumnDef::new(ProfessionalExperiences::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ProfessionalExperiences::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_professional_experiences_user_id")
                            .from(
                                ProfessionalExperiences::Table,
                                ProfessionalExperiences::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Current positions first, then most recent start
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_professional_experiences_ordering
                ON professional_experiences (currently_working DESC, start_date DESC)
                WHERE is_deleted = false;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_professional_experiences_updated_at
                BEFORE UPDATE ON professional_experiences
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS update_professional_experiences_updated_at ON professional_experiences",
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(ProfessionalExperiences::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ProfessionalExperiences {
    Table,
    Id,
    UserId,
    Company,
    Slug,
    CompanyImage,
    CompanyUrl,
    Address,
    Designation,
    JobType,
    StartDate,
    EndDate,
    CurrentlyWorking,
    Description,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
