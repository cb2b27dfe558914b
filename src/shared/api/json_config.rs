use crate::shared::api::ApiResponse;
use actix_web::web::{JsonConfig, QueryConfig};

/// Malformed bodies never reach a handler; they get the standard envelope.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                ApiResponse::bad_request("INVALID_PAYLOAD", &message),
            )
            .into()
        })
}

/// `?page=abc` and friends.
pub fn custom_query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            ApiResponse::bad_request("INVALID_QUERY", &message),
        )
        .into()
    })
}
