pub mod auth;
pub mod extract;
pub mod form;
pub mod health;
pub mod upload;
