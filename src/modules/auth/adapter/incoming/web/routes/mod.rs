mod delete_user;
mod fetch_user;
mod login_user;
mod register_user;

pub use delete_user::soft_delete_user_handler;
pub use fetch_user::{fetch_user_handler, CurrentExperience, UserProfileResponse};
pub use login_user::{login_user_handler, LoginRequestDto, LoginResponse, LoginUserInfo};
pub use register_user::{register_user_handler, RegisterUserRequest, RegisteredUser};

pub(crate) use delete_user::__path_soft_delete_user_handler;
pub(crate) use fetch_user::__path_fetch_user_handler;
pub(crate) use login_user::__path_login_user_handler;
pub(crate) use register_user::__path_register_user_handler;
