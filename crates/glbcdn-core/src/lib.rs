//! Core types for the glbcdn service: configuration, error taxonomy, and
//! shared response models.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
