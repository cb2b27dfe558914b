#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::web;

    use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
    use crate::auth::application::domain::entities::UserId;
    use crate::auth::application::ports::outgoing::TokenProvider;

    pub fn create_test_jwt_service() -> JwtTokenService {
        let jwt_config = JwtConfig {
            issuer: "portfolio-test".to_string(),
            secret_key: "test_secret_key_for_testing_only_0123456789".to_string(),
            access_token_expiry: 3600,
        };
        JwtTokenService::new(jwt_config)
    }

    /// App data the `AuthenticatedUser` extractor reads.
    pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
        let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(create_test_jwt_service());
        web::Data::new(provider)
    }

    /// `Authorization` header value for `user_id`.
    pub fn bearer_for(user_id: UserId) -> String {
        let token = create_test_jwt_service()
            .generate_access_token(user_id.value(), false)
            .expect("test token");
        format!("Bearer {token}")
    }
}
