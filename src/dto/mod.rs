pub mod auth;
pub mod designs;
pub mod products;
