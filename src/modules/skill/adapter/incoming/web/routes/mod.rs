mod create_skill;
mod get_skill;
mod list_skills;
mod update_skill;

pub use create_skill::{create_skill_form_handler, create_skill_handler};
pub use get_skill::get_skill_handler;
pub use list_skills::list_skills_handler;
pub use update_skill::{update_skill_form_handler, update_skill_handler};

pub(crate) use create_skill::{__path_create_skill_form_handler, __path_create_skill_handler};
pub(crate) use get_skill::__path_get_skill_handler;
pub(crate) use list_skills::__path_list_skills_handler;
pub(crate) use update_skill::{__path_update_skill_form_handler, __path_update_skill_handler};
