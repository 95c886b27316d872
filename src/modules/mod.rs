pub mod arrests;
pub mod auth;
pub mod email;
pub mod tokens;
pub mod users;
