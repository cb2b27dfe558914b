pub mod sea_orm_entity;
pub mod skill_store_postgres;

pub use skill_store_postgres::SkillStorePostgres;
