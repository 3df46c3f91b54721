// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ortho_switch` - a smart-home switch backed by two HTTP endpoints.
//!
//! The switch state is read with a GET on one URL and set with a JSON POST
//! on another. The crate provides:
//!
//! - **State client**: [`DeviceStateClient`] issues the two requests
//! - **Host adapter**: [`SwitchAccessory`] exposes the client through the
//!   read/write hooks of a host's on/off characteristic
//! - **Configuration**: [`AccessoryConfig`] parses the host's JSON block
//! - **Device side** (feature `listener`): [`listener::StatusListener`]
//!   serves the two endpoints for a device to be driven by the client
//!
//! # Wire contract
//!
//! | Call  | Request                                   | Response                       |
//! |-------|-------------------------------------------|--------------------------------|
//! | read  | `GET <getUrl>`                            | body `true` is on, else off    |
//! | write | `POST <postUrl>` `{"targetState": <bool>}` | ignored; any status is success |
//!
//! Only transport failures are errors. See [`TransportError`].
//!
//! # Quick Start
//!
//! ```no_run
//! use ortho_switch::{DeviceStateClient, Endpoint, SwitchProtocol, SwitchState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DeviceStateClient::new(
//!         Endpoint::parse("http://127.0.0.1:8080/api/status")?,
//!         Endpoint::parse("http://127.0.0.1:8080/api/order")?,
//!     );
//!
//!     let state = client.query_state().await?;
//!     println!("switch is {state}");
//!
//!     client.apply_state(SwitchState::On).await?;
//!     Ok(())
//! }
//! ```

pub mod accessory;
pub mod config;
pub mod error;
#[cfg(feature = "listener")]
pub mod listener;
pub mod protocol;
pub mod types;

pub use accessory::{AccessoryInformation, SwitchAccessory};
pub use config::AccessoryConfig;
pub use error::{ConfigError, EndpointError, Error, Result, TransportError};
pub use protocol::{DeviceStateClient, HttpConfig, SwitchProtocol};
pub use types::{Endpoint, SwitchState};
