pub use sea_orm_migration::prelude::*;

mod m20250304_105428_create_users_table;
mod m20261012_090000_create_skills_table;
mod m20261012_090100_create_professional_experiences_table;
mod m20261012_090200_create_media_attachments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_105428_create_users_table::Migration),
            Box::new(m20261012_090000_create_skills_table::Migration),
            Box::new(m20261012_090100_create_professional_experiences_table::Migration),
            Box::new(m20261012_090200_create_media_attachments_table::Migration),
        ]
    }
}
