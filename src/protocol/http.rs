// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the switch protocol.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::protocol::SwitchProtocol;
use crate::types::{Endpoint, SwitchState};

// ============================================================================
// HttpConfig - Transport settings
// ============================================================================

/// Transport settings for a [`DeviceStateClient`].
///
/// # Examples
///
/// ```
/// use ortho_switch::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new().with_timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout. `Duration::ZERO` disables it.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the timeout the HTTP client is built with, `None` if disabled.
    #[must_use]
    pub fn effective_timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }

    fn build_client(&self) -> Result<Client, TransportError> {
        let builder = match self.effective_timeout() {
            Some(timeout) => Client::builder().timeout(timeout),
            None => Client::builder(),
        };
        Ok(builder.build()?)
    }

    /// Creates a `DeviceStateClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(
        self,
        read_endpoint: Endpoint,
        write_endpoint: Endpoint,
    ) -> Result<DeviceStateClient, TransportError> {
        let client = self.build_client()?;

        Ok(DeviceStateClient {
            read_endpoint,
            write_endpoint,
            client,
            timeout: self.effective_timeout(),
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// DeviceStateClient
// ============================================================================

/// JSON body posted to the write endpoint: `{"targetState": <bool>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOrder {
    /// The state the device is asked to switch to.
    pub target_state: SwitchState,
}

/// HTTP client for a switch exposed as a read endpoint and a write endpoint.
///
/// The state is read with a GET on the read endpoint and set with a JSON POST
/// on the write endpoint. The two endpoints are independent and never checked
/// against each other.
///
/// # Examples
///
/// ```no_run
/// use ortho_switch::protocol::{DeviceStateClient, SwitchProtocol};
/// use ortho_switch::types::{Endpoint, SwitchState};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DeviceStateClient::new(
///     Endpoint::parse("http://dev.local/api/status")?,
///     Endpoint::parse("http://dev.local/api/order")?,
/// );
///
/// if client.query_state().await? == SwitchState::Off {
///     client.apply_state(SwitchState::On).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceStateClient {
    read_endpoint: Endpoint,
    write_endpoint: Endpoint,
    client: Client,
    timeout: Option<Duration>,
}

impl DeviceStateClient {
    /// Creates a client with the default [`HttpConfig`], the same transport
    /// settings a configuration without `timeoutMs` produces.
    #[must_use]
    pub fn new(read_endpoint: Endpoint, write_endpoint: Endpoint) -> Self {
        let config = HttpConfig::default();
        // Building only fails when the TLS backend cannot start; `Client::new`
        // panics in that case.
        let client = config.build_client().unwrap_or_else(|_| Client::new());

        Self {
            read_endpoint,
            write_endpoint,
            client,
            timeout: config.effective_timeout(),
        }
    }

    /// Returns the total request timeout, `None` if requests never time out.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the endpoint the state is read from.
    #[must_use]
    pub fn read_endpoint(&self) -> &Endpoint {
        &self.read_endpoint
    }

    /// Returns the endpoint the state is written to.
    #[must_use]
    pub fn write_endpoint(&self) -> &Endpoint {
        &self.write_endpoint
    }
}

/// Logs a transport failure the same way for both endpoints.
fn log_failure(err: &TransportError) {
    match err.status() {
        Some(status) => tracing::warn!(status, error = %err.cause(), "HTTP request failed"),
        None => tracing::warn!(error = %err.cause(), "HTTP request failed"),
    }
}

impl SwitchProtocol for DeviceStateClient {
    async fn query_state(&self) -> Result<SwitchState, TransportError> {
        let url = self.read_endpoint.url();

        tracing::debug!(url = %url, "Querying switch state");

        let result = async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            response
                .text()
                .await
                .map_err(|e| TransportError::with_status(e, status.as_u16()))
        }
        .await;

        let body = result.inspect_err(log_failure)?;

        tracing::debug!(body = %body, "Received switch state");

        Ok(SwitchState::from_body(&body))
    }

    /// Posts the desired state to the write endpoint.
    ///
    /// Any completed response counts as success, including 4xx and 5xx
    /// statuses; only a failed transport is an error. A device that rejects
    /// the order with an error status therefore goes unnoticed here.
    async fn apply_state(&self, desired: SwitchState) -> Result<(), TransportError> {
        let url = self.write_endpoint.url();

        tracing::debug!(url = %url, state = %desired, "Setting switch state");

        let order = StateOrder {
            target_state: desired,
        };

        let result = async {
            let response = self.client.post(url.clone()).json(&order).send().await?;
            let status = response.status();
            response
                .bytes()
                .await
                .map_err(|e| TransportError::with_status(e, status.as_u16()))?;
            Ok::<_, TransportError>(status)
        }
        .await;

        let status = result.inspect_err(log_failure)?;

        tracing::debug!(status = status.as_u16(), "Switch state order sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> (Endpoint, Endpoint) {
        (
            Endpoint::parse("http://dev.local/state").unwrap(),
            Endpoint::parse("http://dev.local/order").unwrap(),
        )
    }

    #[test]
    fn new_keeps_endpoints() {
        let (read, write) = endpoints();
        let client = DeviceStateClient::new(read.clone(), write.clone());
        assert_eq!(client.read_endpoint(), &read);
        assert_eq!(client.write_endpoint(), &write);
    }

    #[test]
    fn state_order_body() {
        let on = StateOrder {
            target_state: SwitchState::On,
        };
        let off = StateOrder {
            target_state: SwitchState::Off,
        };
        assert_eq!(serde_json::to_string(&on).unwrap(), r#"{"targetState":true}"#);
        assert_eq!(serde_json::to_string(&off).unwrap(), r#"{"targetState":false}"#);
    }

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.effective_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn http_config_zero_timeout_disables() {
        let config = HttpConfig::new().with_timeout(Duration::ZERO);
        assert_eq!(config.effective_timeout(), None);
    }

    #[test]
    fn new_uses_default_timeout() {
        let (read, write) = endpoints();
        let direct = DeviceStateClient::new(read.clone(), write.clone());
        let configured = HttpConfig::default().into_client(read, write).unwrap();

        assert_eq!(direct.timeout(), Some(HttpConfig::DEFAULT_TIMEOUT));
        assert_eq!(direct.timeout(), configured.timeout());
    }

    #[test]
    fn http_config_into_client() {
        let (read, write) = endpoints();
        let client = HttpConfig::new()
            .with_timeout(Duration::from_millis(1500))
            .into_client(read, write)
            .unwrap();
        assert_eq!(client.read_endpoint().as_str(), "http://dev.local/state");
    }
}
