pub mod auth;

pub use auth::{ActiveUser, AuthenticatedUser};
