// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registration of the accessory with the host.
//!
//! The host owns the accessory lifecycle. It is represented here by the
//! [`AccessoryRegistry`] trait so the switch itself stays an ordinary value
//! that can be built and tested without a host.

use crate::accessory::SwitchAccessory;
use crate::config::AccessoryConfig;
use crate::error::Result;
use crate::protocol::DeviceStateClient;

/// Plugin identifier the accessory is registered under.
pub const PLUGIN_NAME: &str = "homebridge-ortho";

/// Accessory type referenced by the `accessory` key of the host configuration.
pub const ACCESSORY_NAME: &str = "ortho";

/// Builds an accessory from its JSON configuration block.
pub type AccessoryFactory =
    Box<dyn Fn(serde_json::Value) -> Result<SwitchAccessory<DeviceStateClient>> + Send + Sync>;

/// The host's accessory registration interface.
pub trait AccessoryRegistry {
    /// Binds `factory` to the `plugin_name`/`accessory_name` pair.
    fn register_accessory(
        &mut self,
        plugin_name: &str,
        accessory_name: &str,
        factory: AccessoryFactory,
    );
}

/// Registers the switch accessory with the host.
pub fn register<R: AccessoryRegistry + ?Sized>(registry: &mut R) {
    tracing::debug!(
        plugin = PLUGIN_NAME,
        accessory = ACCESSORY_NAME,
        "Registering accessory"
    );
    registry.register_accessory(PLUGIN_NAME, ACCESSORY_NAME, Box::new(build_accessory));
}

/// Builds a switch accessory from the host's configuration block.
///
/// # Errors
///
/// Returns `Error::Config` if the block is malformed or a URL is missing or
/// invalid, and `Error::Transport` if the HTTP client cannot be created.
pub fn build_accessory(config: serde_json::Value) -> Result<SwitchAccessory<DeviceStateClient>> {
    let config = AccessoryConfig::from_value(config)?;
    let name = config.name().to_string();
    let client = config.into_client()?;

    tracing::info!(
        name = %name,
        read = %client.read_endpoint(),
        write = %client.write_endpoint(),
        "Created switch accessory"
    );

    Ok(SwitchAccessory::new(name, client))
}
