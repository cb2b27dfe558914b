pub mod auth;
pub mod experience;
pub mod multimedia;
pub mod skill;
