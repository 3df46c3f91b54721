// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter between the host's accessory interface and a switch protocol.
//!
//! The host drives a switch through two hooks on its `On` characteristic:
//! a read hook that answers with `(error, bool)` and a write hook that takes
//! a `bool` and a completion callback. [`SwitchAccessory`] provides both,
//! either as `async` methods or in callback form.
//!
//! ```no_run
//! use ortho_switch::accessory::SwitchAccessory;
//! use ortho_switch::config::AccessoryConfig;
//!
//! # async fn example() -> ortho_switch::Result<()> {
//! let config = AccessoryConfig::new(
//!     "http://127.0.0.1:8080/api/status",
//!     "http://127.0.0.1:8080/api/order",
//! );
//! let accessory = SwitchAccessory::new(config.name(), config.clone().into_client()?);
//!
//! accessory.on_set(true, |result| {
//!     if let Err(e) = result {
//!         eprintln!("switching failed: {e}");
//!     }
//! });
//! # Ok(())
//! # }
//! ```

mod information;
mod registry;

pub use information::{AccessoryInformation, Characteristic, Service};
pub use registry::{
    ACCESSORY_NAME, AccessoryFactory, AccessoryRegistry, PLUGIN_NAME, build_accessory, register,
};

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::protocol::SwitchProtocol;

/// A switch accessory backed by a [`SwitchProtocol`].
///
/// Cloning is cheap; clones share the protocol.
#[derive(Debug)]
pub struct SwitchAccessory<P: SwitchProtocol> {
    name: String,
    information: AccessoryInformation,
    protocol: Arc<P>,
}

impl<P: SwitchProtocol> Clone for SwitchAccessory<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            information: self.information.clone(),
            protocol: Arc::clone(&self.protocol),
        }
    }
}

impl<P: SwitchProtocol> SwitchAccessory<P> {
    /// Creates an accessory named `name` that talks through `protocol`.
    #[must_use]
    pub fn new(name: impl Into<String>, protocol: P) -> Self {
        Self {
            name: name.into(),
            information: AccessoryInformation::default(),
            protocol: Arc::new(protocol),
        }
    }

    /// Returns the accessory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identification published to the host.
    #[must_use]
    pub fn information(&self) -> &AccessoryInformation {
        &self.information
    }

    /// Returns the underlying protocol.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the services the host should publish for this accessory.
    #[must_use]
    pub fn services(&self) -> Vec<Service> {
        vec![
            Service::AccessoryInformation(self.information.clone()),
            Service::Switch {
                name: self.name.clone(),
            },
        ]
    }

    /// Read hook of the `On` characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the device could not be reached.
    pub async fn get_on(&self) -> Result<bool> {
        let state = self.protocol.query_state().await?;
        Ok(state.is_on())
    }

    /// Write hook of the `On` characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the device could not be reached.
    pub async fn set_on(&self, on: bool) -> Result<()> {
        self.protocol.apply_state(on.into()).await?;
        Ok(())
    }
}

impl<P> SwitchAccessory<P>
where
    P: SwitchProtocol + Send + Sync + 'static,
{
    /// Callback form of [`get_on`](Self::get_on).
    ///
    /// The read runs as a task on the current tokio runtime and `callback`
    /// receives its outcome. Calls are not ordered against each other.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn on_get<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        let protocol = Arc::clone(&self.protocol);
        tokio::spawn(async move {
            let result = protocol
                .query_state()
                .await
                .map(bool::from)
                .map_err(Error::from);
            callback(result);
        })
    }

    /// Callback form of [`set_on`](Self::set_on).
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn on_set<F>(&self, on: bool, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let protocol = Arc::clone(&self.protocol);
        tokio::spawn(async move {
            let result = protocol.apply_state(on.into()).await.map_err(Error::from);
            callback(result);
        })
    }
}
