//! Default use cases for tests that do not exercise them. Each one answers
//! with the use case's "nothing there" error, except `by_id`, which reports
//! an active account so that write routes accept any valid token.

use async_trait::async_trait;

use crate::auth::application::domain::entities::{sample_user, User, UserId};
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserInput, ICreateUserUseCase,
};
use crate::auth::application::use_cases::fetch_profile::{
    FetchUserProfileError, FetchUserProfileUseCase,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::soft_delete_user::{
    ISoftDeleteUserUseCase, SoftDeleteUserError,
};

#[derive(Default)]
pub struct StubCreateUserUseCase;

#[async_trait]
impl ICreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, _input: CreateUserInput) -> Result<User, CreateUserError> {
        Err(CreateUserError::RepositoryError(
            "create user not configured for this test".to_string(),
        ))
    }
}

#[derive(Default)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::InvalidCredentials)
    }
}

#[derive(Default)]
pub struct StubFetchUserProfileUseCase;

#[async_trait]
impl FetchUserProfileUseCase for StubFetchUserProfileUseCase {
    async fn by_slug(&self, _slug: &str) -> Result<User, FetchUserProfileError> {
        Err(FetchUserProfileError::NotFound)
    }

    async fn by_id(&self, user_id: UserId) -> Result<User, FetchUserProfileError> {
        let mut user = sample_user("stub@example.com");
        user.id = user_id;
        Ok(user)
    }
}

#[derive(Default)]
pub struct StubSoftDeleteUserUseCase;

#[async_trait]
impl ISoftDeleteUserUseCase for StubSoftDeleteUserUseCase {
    async fn execute(&self, _user_id: UserId) -> Result<(), SoftDeleteUserError> {
        Err(SoftDeleteUserError::UserNotFound)
    }
}
