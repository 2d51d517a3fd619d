mod context;

pub use context::{ErrorContext, format_error_chain};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostProbeError {
    #[error("Unrecognized operating system: {0}")]
    UnrecognizedOperatingSystem(String),

    #[error("Unrecognized hardware architecture: {0}")]
    UnrecognizedArchitecture(String),

    #[error("Unrecognized ABI: {0}")]
    UnrecognizedAbi(String),

    #[error("Operating system is not specified for target {0}")]
    MissingOperatingSystem(String),

    #[error("Hardware architecture is not specified for target {0}")]
    MissingArchitecture(String),

    #[error("ABI '{abi}' is not valid for operating system '{os}'")]
    InvalidAbi { abi: String, os: String },

    #[error("Target {target} has no {convention} triple")]
    UnsupportedTarget { target: String, convention: String },

    #[error("Invalid target token: {0}")]
    InvalidTarget(String),

    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Failed to parse {format} output: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Invalid naming template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("Command '{0}' not found")]
    CommandNotFound(String),

    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Command '{command}' timed out after {timeout_secs} seconds")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("Could not detect {0}")]
    NotDetected(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HostProbeError>;
