pub mod adapters;
pub mod analytics;
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod services;

pub use config::AppConfig;
pub use error::{Result, StatsError};
pub use provider::{MemoryProvider, StatsProvider};
pub use services::StatsService;
