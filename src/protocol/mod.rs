// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol used to read and set the state of the switch.
//!
//! [`DeviceStateClient`] is the HTTP implementation: one GET endpoint to read
//! the state and one POST endpoint to set it. The [`SwitchProtocol`] trait is
//! the seam the accessory adapter is written against.

mod http;

use std::future::Future;

pub use http::{DeviceStateClient, HttpConfig, StateOrder};

use crate::error::TransportError;
use crate::types::SwitchState;

/// Trait for protocol implementations that can read and set the switch.
///
/// Each call is one independent round trip. Implementations keep no state
/// between calls, so overlapping calls are allowed and may complete in any
/// order.
pub trait SwitchProtocol {
    /// Reads the current state of the switch.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request does not complete.
    fn query_state(&self) -> impl Future<Output = Result<SwitchState, TransportError>> + Send;

    /// Asks the device to switch to `desired`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request does not complete.
    fn apply_state(
        &self,
        desired: SwitchState,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
