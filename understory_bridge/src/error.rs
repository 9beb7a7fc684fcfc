// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised at the host boundary.
//!
//! The engine itself never fails; these only cover decoding requests, encoding
//! responses and loading configuration.

use std::path::PathBuf;

/// Boundary failure.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The request was not valid JSON or named an unknown operation.
    #[error("malformed request: {0}")]
    Decode(#[source] serde_json::Error),

    /// A response could not be serialized.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was not valid TOML for [`EngineConfig`](crate::EngineConfig).
    #[error("invalid config syntax: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration could not be written as TOML.
    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// A configuration value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Result alias for boundary operations.
pub type Result<T, E = BridgeError> = core::result::Result<T, E>;
