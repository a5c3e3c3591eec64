pub mod change_password;
pub mod counting;
pub mod error;
pub mod home;
pub mod login;
pub mod reset_password;
pub mod surveys;
pub mod users;
