pub mod experience_store_postgres;
pub mod sea_orm_entity;

pub use experience_store_postgres::ExperienceStorePostgres;
