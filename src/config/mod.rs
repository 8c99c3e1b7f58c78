//! Configuration module for FinFree
//!
//! - XDG-compliant path resolution
//! - User settings persistence (currency symbol, petty-cash daily limit)

pub mod paths;
pub mod settings;

pub use paths::FinFreePaths;
pub use settings::Settings;
