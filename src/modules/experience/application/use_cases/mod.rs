pub mod current_experience;
