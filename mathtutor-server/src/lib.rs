pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod prompt;
pub mod state;
pub mod upstream;
