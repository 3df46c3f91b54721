// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ortho_switch` library.
//!
//! The state client itself only ever fails with [`TransportError`]. The
//! remaining kinds belong to the collaborators around it: configuration
//! loading, endpoint parsing and the device-side listener.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP call did not complete.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The accessory configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The device-side listener could not bind or serve.
    #[error("listener error: {0}")]
    Listener(#[from] std::io::Error),
}

/// Failure below the application layer: connection refused, DNS failure,
/// timeout, or a response body that could not be read to the end.
///
/// A completed HTTP response is never a `TransportError`, whatever its
/// status code.
#[derive(Debug, Error)]
#[error("HTTP request failed: {source}")]
pub struct TransportError {
    source: reqwest::Error,
    status: Option<u16>,
}

impl TransportError {
    /// Wraps a transport failure, taking the status code from the cause if
    /// it carries one.
    #[must_use]
    pub fn new(source: reqwest::Error) -> Self {
        let status = source.status().map(|s| s.as_u16());
        Self { source, status }
    }

    /// Wraps a failure that happened after the response head was received.
    #[must_use]
    pub fn with_status(source: reqwest::Error, status: u16) -> Self {
        Self {
            source,
            status: Some(status),
        }
    }

    /// Returns the status code of the partial response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the underlying HTTP client error.
    #[must_use]
    pub fn cause(&self) -> &reqwest::Error {
        &self.source
    }

    /// Returns true if the connection could not be established.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        self.source.is_connect()
    }

    /// Returns true if the transport gave up waiting.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.source.is_timeout()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        Self::new(source)
    }
}

/// Errors related to endpoint addresses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The text is not a valid absolute URL.
    #[error("invalid URL {value:?}: {message}")]
    InvalidUrl {
        /// The rejected input.
        value: String,
        /// Description of the parse failure.
        message: String,
    },
}

/// Errors related to loading the accessory configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has the wrong shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A configured URL could not be turned into an endpoint.
    #[error("invalid {field}: {source}")]
    Endpoint {
        /// The configuration key holding the URL.
        field: &'static str,
        /// Why the URL was rejected.
        source: EndpointError,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = ConfigError::MissingField("getUrl");
        assert_eq!(err.to_string(), "missing required field: getUrl");
    }

    #[test]
    fn endpoint_error_display() {
        let err = ConfigError::Endpoint {
            field: "postUrl",
            source: EndpointError::InvalidUrl {
                value: "dev.local".to_string(),
                message: "relative URL without a base".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "invalid postUrl: invalid URL \"dev.local\": relative URL without a base"
        );
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::MissingField("postUrl").into();
        assert!(matches!(err, Error::Config(ConfigError::MissingField("postUrl"))));
    }
}
