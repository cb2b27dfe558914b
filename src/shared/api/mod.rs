pub mod json_config;
pub mod page;
pub mod response;

pub use json_config::{custom_json_config, custom_query_config};
pub use page::{error_response, page_response, PageQuery};
pub use response::{ApiError, ApiResponse};
