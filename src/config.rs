// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration as handed over by the host.
//!
//! The host passes the accessory block of its JSON configuration file:
//!
//! ```json
//! {
//!     "accessory": "ortho",
//!     "name": "Ortho",
//!     "getUrl": "http://127.0.0.1:8080/api/status",
//!     "postUrl": "http://127.0.0.1:8080/api/order"
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::protocol::{DeviceStateClient, HttpConfig};
use crate::types::Endpoint;

/// Configuration of one switch accessory.
///
/// Keys the accessory does not know about (such as the host's own
/// `accessory` key) are ignored.
///
/// # Examples
///
/// ```
/// use ortho_switch::config::AccessoryConfig;
///
/// let config = AccessoryConfig::from_json(r#"{
///     "getUrl": "http://dev.local/state",
///     "postUrl": "http://dev.local/order"
/// }"#).unwrap();
///
/// assert_eq!(config.name(), "ortho");
/// let (read, write) = config.endpoints().unwrap();
/// assert_eq!(read.url().path(), "/state");
/// assert_eq!(write.url().path(), "/order");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryConfig {
    name: Option<String>,
    get_url: Option<String>,
    post_url: Option<String>,
    timeout_ms: Option<u64>,
}

impl AccessoryConfig {
    /// Name used when the configuration does not give one.
    pub const DEFAULT_NAME: &'static str = "ortho";

    /// Creates a configuration from the two endpoint URLs.
    #[must_use]
    pub fn new(get_url: impl Into<String>, post_url: impl Into<String>) -> Self {
        Self {
            name: None,
            get_url: Some(get_url.into()),
            post_url: Some(post_url.into()),
            timeout_ms: None,
        }
    }

    /// Sets the accessory name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the transport timeout. `Duration::ZERO` disables it.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the text is not a JSON object of the
    /// expected shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a configuration from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the value has the wrong shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the accessory name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }

    /// Returns the transport settings.
    ///
    /// Without `timeoutMs` the default timeout applies; `timeoutMs: 0` means
    /// requests never time out.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        match self.timeout_ms {
            Some(ms) => HttpConfig::new().with_timeout(Duration::from_millis(ms)),
            None => HttpConfig::new(),
        }
    }

    /// Parses the read (`getUrl`) and write (`postUrl`) endpoints.
    ///
    /// The endpoints are parsed independently; nothing checks that they point
    /// at the same device.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if either URL is absent, or
    /// `ConfigError::Endpoint` if one cannot be parsed.
    pub fn endpoints(&self) -> Result<(Endpoint, Endpoint), ConfigError> {
        let read = parse_endpoint("getUrl", self.get_url.as_deref())?;
        let write = parse_endpoint("postUrl", self.post_url.as_deref())?;
        Ok((read, write))
    }

    /// Builds the state client described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint is missing or invalid, or if the HTTP
    /// client cannot be created.
    pub fn into_client(self) -> crate::Result<DeviceStateClient> {
        let (read, write) = self.endpoints()?;
        Ok(self.http_config().into_client(read, write)?)
    }
}

fn parse_endpoint(field: &'static str, value: Option<&str>) -> Result<Endpoint, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField(field))?;
    Endpoint::parse(value).map_err(|source| ConfigError::Endpoint { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EndpointError;

    #[test]
    fn from_json_full() {
        let config = AccessoryConfig::from_json(
            r#"{
                "accessory": "ortho",
                "name": "Desk Lamp",
                "getUrl": "http://127.0.0.1:8080/api/status",
                "postUrl": "http://127.0.0.1:8080/api/order",
                "timeoutMs": 2500
            }"#,
        )
        .unwrap();

        assert_eq!(config.name(), "Desk Lamp");
        assert_eq!(config.http_config().timeout(), Duration::from_millis(2500));

        let (read, write) = config.endpoints().unwrap();
        assert_eq!(read.as_str(), "http://127.0.0.1:8080/api/status");
        assert_eq!(write.as_str(), "http://127.0.0.1:8080/api/order");
    }

    #[test]
    fn defaults() {
        let config = AccessoryConfig::new("http://a/s", "http://b/o");
        assert_eq!(config.name(), AccessoryConfig::DEFAULT_NAME);
        assert_eq!(config.http_config(), HttpConfig::default());
    }

    #[test]
    fn missing_get_url() {
        let config = AccessoryConfig::from_json(r#"{"postUrl": "http://dev.local/order"}"#).unwrap();
        let err = config.endpoints().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("getUrl")));
    }

    #[test]
    fn missing_post_url() {
        let config = AccessoryConfig::from_json(r#"{"getUrl": "http://dev.local/state"}"#).unwrap();
        let err = config.endpoints().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("postUrl")));
    }

    #[test]
    fn invalid_url_names_field() {
        let config = AccessoryConfig::new("http://dev.local/state", "not a url");
        let err = config.endpoints().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Endpoint {
                field: "postUrl",
                source: EndpointError::InvalidUrl { .. }
            }
        ));
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = AccessoryConfig::from_json(
            r#"{"getUrl": "http://a/s", "postUrl": "http://b/o", "timeoutMs": 0}"#,
        )
        .unwrap();
        assert_eq!(config.http_config().effective_timeout(), None);
        assert_eq!(config.into_client().unwrap().timeout(), None);
    }

    #[test]
    fn config_and_direct_clients_share_default_timeout() {
        let config = AccessoryConfig::new("http://a/s", "http://b/o");
        let (read, write) = config.endpoints().unwrap();
        let direct = DeviceStateClient::new(read, write);
        assert_eq!(config.into_client().unwrap().timeout(), direct.timeout());
    }

    #[test]
    fn any_scheme_is_accepted() {
        let config = AccessoryConfig::new("ftp://dev.local/state", "mailto:switch@dev.local");
        assert!(config.endpoints().is_ok());
    }

    #[test]
    fn endpoints_are_not_cross_validated() {
        let config = AccessoryConfig::new("http://one.local/state", "https://other.example:9443/x");
        assert!(config.endpoints().is_ok());
    }

    #[test]
    fn wrong_shape_is_json_error() {
        let err = AccessoryConfig::from_json(r#"{"getUrl": 42}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn with_timeout_round_trips_through_http_config() {
        let config = AccessoryConfig::new("http://a/s", "http://b/o")
            .with_name("Lamp")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.name(), "Lamp");
        assert_eq!(config.http_config().timeout(), Duration::from_secs(3));
    }

    #[test]
    fn into_client() {
        let client = AccessoryConfig::new("http://dev.local/state", "http://dev.local/order")
            .into_client()
            .unwrap();
        assert_eq!(client.write_endpoint().as_str(), "http://dev.local/order");
    }
}
