// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed HTTP call targets.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::EndpointError;

/// An immutable, parsed absolute URL that one HTTP call is sent to.
///
/// Parsing is the only check. Neither the scheme nor reachability is
/// looked at: an `ftp://` endpoint or one naming a host that does not exist
/// is still a valid endpoint, and the failure surfaces as a
/// [`TransportError`](crate::error::TransportError) when a request is made.
///
/// # Examples
///
/// ```
/// use ortho_switch::types::Endpoint;
///
/// let endpoint = Endpoint::parse("http://dev.local/state").unwrap();
/// assert_eq!(endpoint.url().host_str(), Some("dev.local"));
/// assert_eq!(endpoint.url().path(), "/state");
///
/// assert!(Endpoint::parse("/relative").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Parses an endpoint from an absolute URL string.
    ///
    /// # Errors
    ///
    /// Returns `EndpointError::InvalidUrl` if the text is not an absolute URL.
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        Url::parse(input)
            .map(Self)
            .map_err(|e| EndpointError::InvalidUrl {
                value: input.to_string(),
                message: e.to_string(),
            })
    }

    /// Returns the parsed URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL in serialized form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for Endpoint {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
