use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use tracing::warn;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::auth::application::use_cases::fetch_profile::{
    FetchUserProfileError, FetchUserProfileUseCase,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Actor behind a valid bearer access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub is_staff: bool,
}

/// Authenticated actor whose account is still active. Tokens outlive a soft
/// delete, so every write goes through this lookup.
#[derive(Debug, Clone, Copy)]
pub struct ActiveUser {
    pub user_id: UserId,
    pub is_staff: bool,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let Some(jwt_service) = req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
    else {
        tracing::error!("Token provider is not registered as app data");
        return Err(create_api_error(ApiResponse::internal_error()));
    };

    let Some(token) = extract_token_from_header(req) else {
        return Err(create_api_error(ApiResponse::unauthorized(
            "MISSING_AUTH_HEADER",
            "Missing or invalid authorization header",
        )));
    };

    match jwt_service.verify_token(&token) {
        Ok(claims) => Ok(AuthenticatedUser {
            user_id: UserId::from(claims.sub),
            is_staff: claims.is_staff,
        }),
        Err(_) => Err(create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN",
            "Invalid or expired token",
        ))),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for ActiveUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let authenticated = authenticate(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let user = authenticated?;
            let Some(state) = state else {
                tracing::error!("AppState is not registered as app data");
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            match state.fetch_user_profile_use_case.by_id(user.user_id).await {
                Ok(account) if account.is_active => Ok(ActiveUser {
                    user_id: user.user_id,
                    is_staff: user.is_staff,
                }),
                Ok(_) | Err(FetchUserProfileError::NotFound) => {
                    warn!(user_id = %user.user_id, "Token presented for an inactive or deleted account");
                    Err(create_api_error(ApiResponse::unauthorized(
                        "ACCOUNT_INACTIVE",
                        "This account is no longer active",
                    )))
                }
            }
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
