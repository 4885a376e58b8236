pub mod actors;
pub mod api;
pub mod config;
pub mod persistence;
pub mod probe;
pub mod registry;
pub mod scheduler;
pub mod stats;
