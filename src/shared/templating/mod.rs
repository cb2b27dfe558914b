pub mod filters;

pub use filters::{file_url, var_to_title};
