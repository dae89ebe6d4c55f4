// Shared kernel used by every module

pub mod config; // Environment-driven settings
pub mod domain; // Shared value objects (attribution)
pub mod errors; // AppError and HTTP rendering
pub mod infrastructure; // Database pool and migrations
pub mod utils; // Logging and input validation

#[cfg(test)]
pub mod testing;

pub use config::AppConfig;
pub use infrastructure::database::Database;
