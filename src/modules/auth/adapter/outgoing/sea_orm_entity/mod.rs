pub mod users;

pub use users::{ActiveModel, Column, Entity, Model};
