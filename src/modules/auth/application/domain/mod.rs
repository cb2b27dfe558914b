pub mod email;
pub mod entities;
