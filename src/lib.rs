pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod repos;
pub mod tags;

pub use error::{ConfigError, Error, Result};
