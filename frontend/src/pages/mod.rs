pub mod home;
pub mod login;
pub mod sessions;
pub mod students;
