pub mod endpoints;
pub mod export;
pub mod health;
