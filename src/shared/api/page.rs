use actix_web::{http::header, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::shared::api::ApiResponse;
use crate::shared::crud::{CrudError, Level, Notification, Outcome, Page};
use crate::shared::flash::Flash;

/// `?page=` on list and create pages. 1-based.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Turns a controller result into the HTTP response.
///
/// Redirects queue this request's notifications for the next page; rendered
/// pages (including rejected submissions) show them inline together with
/// anything queued earlier.
pub fn page_response(
    result: Result<Outcome, CrudError>,
    notifications: Vec<Notification>,
    flash: &Flash,
) -> HttpResponse {
    match result {
        Ok(Outcome::Redirect(location)) => {
            flash.push_all(&notifications);
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish()
        }
        Ok(Outcome::Rendered(page)) => {
            ApiResponse::success(with_messages(page, flash, notifications))
        }
        Ok(Outcome::ValidationFailed { page, errors }) => {
            let message = notifications
                .iter()
                .rev()
                .find(|n| n.level == Level::Error)
                .map(|n| n.message.clone())
                .unwrap_or_else(|| "Submitted data is invalid".to_string());
            tracing::debug!(fields = ?errors.fields.keys().collect::<Vec<_>>(), "Form rejected");

            ApiResponse::unprocessable(
                with_messages(page, flash, notifications),
                "VALIDATION_FAILED",
                &message,
            )
        }
        Err(e) => {
            // Error pages have no context to show messages in.
            flash.push_all(&notifications);
            error_response(e)
        }
    }
}

fn with_messages(mut page: Page, flash: &Flash, current: Vec<Notification>) -> Page {
    let mut messages = flash.take();
    messages.extend(current);

    match serde_json::to_value(&messages) {
        Ok(value) => {
            page.context.insert("messages".to_string(), value);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize page messages");
            page.context
                .insert("messages".to_string(), Value::Array(Vec::new()));
        }
    }
    page
}

pub fn error_response(error: CrudError) -> HttpResponse {
    match error {
        CrudError::NotFound(message) => ApiResponse::not_found("NOT_FOUND", &message),
        CrudError::EmptyList => ApiResponse::not_found("EMPTY_LIST", "Nothing to show here yet"),
        CrudError::Forbidden => ApiResponse::forbidden(
            "FORBIDDEN",
            "You do not have permission to modify this record",
        ),
        CrudError::UnsupportedAction(action) => ApiResponse::method_not_allowed(
            "UNSUPPORTED_ACTION",
            &format!("Action '{action}' is not supported here"),
        ),
        CrudError::StoreUnavailable(cause) => {
            tracing::error!(cause = %cause, "Record store unavailable");
            ApiResponse::internal_error()
        }
        CrudError::Route(e) => {
            tracing::error!(error = %e, "Failed to build redirect location");
            ApiResponse::internal_error()
        }
    }
}
