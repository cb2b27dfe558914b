mod create_experience;
mod delete_experience_media;
mod get_experience;
mod list_experiences;
mod update_experience;

pub use create_experience::{create_experience_form_handler, create_experience_handler};
pub use delete_experience_media::delete_experience_media_handler;
pub use get_experience::get_experience_handler;
pub use list_experiences::list_experiences_handler;
pub use update_experience::{update_experience_form_handler, update_experience_handler};

pub(crate) use create_experience::{
    __path_create_experience_form_handler, __path_create_experience_handler,
};
pub(crate) use delete_experience_media::__path_delete_experience_media_handler;
pub(crate) use get_experience::__path_get_experience_handler;
pub(crate) use list_experiences::__path_list_experiences_handler;
pub(crate) use update_experience::{
    __path_update_experience_form_handler, __path_update_experience_handler,
};
