pub mod api;
pub mod config;
pub mod crud;
pub mod flash;
pub mod templating;
