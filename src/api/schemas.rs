//! Response envelopes as they appear in the OpenAPI document. Handlers build
//! them through `ApiResponse`; these types only describe the wire shape.

use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::crud::Page;

/// Envelope of a 200 response
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    /// Rendered page, profile or token pair
    pub data: T,
}

/// Envelope of a 4xx/5xx response without a page
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

/// Envelope of a 422 response. The page is re-rendered with the submitted
/// form data, its field errors and any flash messages.
#[derive(Serialize, ToSchema)]
pub struct RejectedFormResponse {
    #[schema(example = false)]
    pub success: bool,
    pub data: Page,
    #[schema(example = json!({
        "code": "VALIDATION_FAILED",
        "message": "Failed to create Skill"
    }))]
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable code, e.g. `NOT_FOUND`, `FORBIDDEN`, `INVALID_TOKEN`
    #[schema(example = "NOT_FOUND")]
    pub code: String,

    #[schema(example = "No Skill matches the given query")]
    pub message: String,
}
