pub mod media_store_postgres;
pub mod sea_orm_entity;

pub use media_store_postgres::MediaStorePostgres;
