// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the client, the accessory adapter and the listener.
//!
//! # Types
//!
//! - [`SwitchState`] - On/Off state of the device
//! - [`Endpoint`] - Parsed absolute URL of one call target

mod endpoint;
mod switch;

pub use endpoint::Endpoint;
pub use switch::SwitchState;
