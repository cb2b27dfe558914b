pub mod create_user;
pub mod fetch_profile;
pub mod login_user;
pub mod soft_delete_user;
