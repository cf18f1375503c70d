pub mod config;
pub mod error;
pub mod logos;
pub mod types;
