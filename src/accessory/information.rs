// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service descriptors published to the host.

/// Identification shown by the host for the accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInformation {
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model identifier.
    pub model: String,
    /// Serial number.
    pub serial_number: String,
}

impl AccessoryInformation {
    /// Manufacturer reported by the switch.
    pub const MANUFACTURER: &'static str = "Opal Holley";
    /// Model reported by the switch.
    pub const MODEL: &'static str = "v1";
    /// Serial number reported by the switch.
    pub const SERIAL_NUMBER: &'static str = "orthov1";
}

impl Default for AccessoryInformation {
    fn default() -> Self {
        Self {
            manufacturer: Self::MANUFACTURER.to_string(),
            model: Self::MODEL.to_string(),
            serial_number: Self::SERIAL_NUMBER.to_string(),
        }
    }
}

/// Characteristic exposed through a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Manufacturer name (read-only).
    Manufacturer,
    /// Model identifier (read-only).
    Model,
    /// Serial number (read-only).
    SerialNumber,
    /// On/off state (read and write).
    On,
}

/// A service the accessory publishes to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Service {
    /// Static identification.
    AccessoryInformation(AccessoryInformation),
    /// The on/off switch.
    Switch {
        /// Display name of the switch.
        name: String,
    },
}

impl Service {
    /// Returns the characteristics the host can access on this service.
    #[must_use]
    pub fn characteristics(&self) -> &'static [Characteristic] {
        match self {
            Self::AccessoryInformation(_) => &[
                Characteristic::Manufacturer,
                Characteristic::Model,
                Characteristic::SerialNumber,
            ],
            Self::Switch { .. } => &[Characteristic::On],
        }
    }
}
