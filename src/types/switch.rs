// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch state of the modelled device.

use std::fmt;

use serde::{Deserialize, Serialize};

/// On/off state of the switch.
///
/// Serializes as a plain JSON boolean, which is the payload format of the
/// write endpoint.
///
/// # Examples
///
/// ```
/// use ortho_switch::types::SwitchState;
///
/// assert_eq!(SwitchState::from_body("true"), SwitchState::On);
/// assert_eq!(SwitchState::from_body("TRUE"), SwitchState::Off);
/// assert!(bool::from(SwitchState::On));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum SwitchState {
    /// The device is off.
    #[default]
    Off,
    /// The device is on.
    On,
}

impl SwitchState {
    /// Body text of the read endpoint that denotes the on state.
    pub const ON_BODY: &'static str = "true";

    /// Decodes a read endpoint response body.
    ///
    /// Only the exact text `true` means on. Anything else, including an
    /// empty body, `"TRUE"`, `"1"` or garbage, means off. This never fails.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        if body == Self::ON_BODY {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Returns true for [`SwitchState::On`].
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns the text the device reports for this state.
    #[must_use]
    pub const fn as_body(self) -> &'static str {
        match self {
            Self::On => "true",
            Self::Off => "false",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
        })
    }
}

impl From<bool> for SwitchState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<SwitchState> for bool {
    fn from(state: SwitchState) -> Self {
        state.is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_body_only_exact_true_is_on() {
        assert_eq!(SwitchState::from_body("true"), SwitchState::On);

        for body in ["", "false", "TRUE", "True", "1", "on", " true", "true\n", "{\"on\":true}"] {
            assert_eq!(SwitchState::from_body(body), SwitchState::Off, "body {body:?}");
        }
    }

    #[test]
    fn from_bool() {
        assert_eq!(SwitchState::from(true), SwitchState::On);
        assert_eq!(SwitchState::from(false), SwitchState::Off);
        assert!(!bool::from(SwitchState::Off));
    }

    #[test]
    fn serializes_as_bool() {
        assert_eq!(serde_json::to_string(&SwitchState::On).unwrap(), "true");
        assert_eq!(serde_json::to_string(&SwitchState::Off).unwrap(), "false");
        assert_eq!(
            serde_json::from_str::<SwitchState>("true").unwrap(),
            SwitchState::On
        );
    }

    #[test]
    fn display() {
        assert_eq!(SwitchState::On.to_string(), "on");
        assert_eq!(SwitchState::Off.to_string(), "off");
        assert_eq!(SwitchState::On.as_body(), "true");
    }
}
