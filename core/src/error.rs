//! Error types for the core crate
//!
//! This module provides a consolidated error type for the core crate,
//! wrapping errors from the chain engine, the table and the configuration
//! layer.

use thiserror::Error;
use std::io;

use crate::chain::ChainError;
use crate::table::TableError;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Table operation error
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// Chain operation error
    #[error("Chain error: {0}")]
    ChainError(#[from] ChainError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for the core crate
pub type Result<T> = std::result::Result<T, CoreError>;

/// Convert a string error to a ConfigError
pub fn to_config_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::ConfigError(err.to_string())
}
