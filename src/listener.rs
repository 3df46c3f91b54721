// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-side half of the wire contract.
//!
//! A device that wants to be driven by [`DeviceStateClient`] serves two
//! endpoints:
//!
//! - `GET /api/status` answers `true` or `false`
//! - `POST /api/order` takes `{"targetState": <bool>}`
//!
//! Orders are not applied by the listener. They are handed to the device as
//! [`RemoteCommand`]s, and the device reports its state back through
//! [`StatusListener::set_status`] once it has acted on them.
//!
//! ```no_run
//! use ortho_switch::listener::{RemoteCommand, StatusListener};
//! use ortho_switch::types::SwitchState;
//!
//! # async fn example() -> ortho_switch::Result<()> {
//! let (listener, mut commands) = StatusListener::new(SwitchState::On);
//!
//! let device = listener.clone();
//! tokio::spawn(async move {
//!     while let Some(command) = commands.recv().await {
//!         // drive the hardware, then report
//!         device.set_status(command.into());
//!     }
//! });
//!
//! listener.serve(StatusListener::default_addr()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`DeviceStateClient`]: crate::protocol::DeviceStateClient

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use parking_lot::RwLock;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::Result;
use crate::protocol::StateOrder;
use crate::types::SwitchState;

/// Path of the read endpoint.
pub const STATUS_PATH: &str = "/api/status";

/// Path of the write endpoint.
pub const ORDER_PATH: &str = "/api/order";

/// A state change requested through the write endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteCommand {
    /// Switch on.
    On,
    /// Switch off.
    Off,
}

impl From<SwitchState> for RemoteCommand {
    fn from(state: SwitchState) -> Self {
        match state {
            SwitchState::On => Self::On,
            SwitchState::Off => Self::Off,
        }
    }
}

impl From<RemoteCommand> for SwitchState {
    fn from(command: RemoteCommand) -> Self {
        match command {
            RemoteCommand::On => Self::On,
            RemoteCommand::Off => Self::Off,
        }
    }
}

#[derive(Debug)]
struct Shared {
    status: RwLock<SwitchState>,
    commands: mpsc::Sender<RemoteCommand>,
}

/// HTTP listener serving the status and order endpoints of a device.
///
/// Clones share the reported status and the command channel.
#[derive(Debug, Clone)]
pub struct StatusListener {
    shared: Arc<Shared>,
}

impl StatusListener {
    /// Port the device listens on by default.
    pub const DEFAULT_PORT: u16 = 8080;

    /// Number of orders that can wait for the device. While the buffer is
    /// full, further orders are answered with `503 Service Unavailable`
    /// without waiting.
    pub const COMMAND_BUFFER: usize = 16;

    /// Creates a listener reporting `initial` and the receiver the device
    /// reads orders from.
    #[must_use]
    pub fn new(initial: SwitchState) -> (Self, mpsc::Receiver<RemoteCommand>) {
        let (commands, rx) = mpsc::channel(Self::COMMAND_BUFFER);
        let shared = Arc::new(Shared {
            status: RwLock::new(initial),
            commands,
        });
        (Self { shared }, rx)
    }

    /// Loopback address on the default port.
    #[must_use]
    pub fn default_addr() -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, Self::DEFAULT_PORT))
    }

    /// Returns the status currently reported on the read endpoint.
    #[must_use]
    pub fn status(&self) -> SwitchState {
        *self.shared.status.read()
    }

    /// Updates the status reported on the read endpoint.
    pub fn set_status(&self, status: SwitchState) {
        *self.shared.status.write() = status;
    }

    /// Builds the router for both endpoints.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route(STATUS_PATH, get(handle_status))
            .route(ORDER_PATH, post(handle_order))
            .with_state(self.clone())
    }

    /// Binds `addr` and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns `Error::Listener` if the address cannot be bound or serving
    /// fails.
    pub async fn serve(self, addr: impl ToSocketAddrs) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_shutdown(listener, std::future::pending())
            .await
    }

    /// Serves on an already bound listener until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Listener` if serving fails.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(addr = %addr, "Serving switch endpoints");
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

async fn handle_status(State(listener): State<StatusListener>) -> impl IntoResponse {
    let status = listener.status();
    tracing::info!(status = %status, "Received a status request");
    (
        [(header::CONTENT_TYPE, "application/json")],
        status.as_body(),
    )
}

async fn handle_order(State(listener): State<StatusListener>, body: String) -> StatusCode {
    let Some(command) = parse_order(&body) else {
        tracing::warn!(body = %body, "Rejected malformed order");
        return StatusCode::BAD_REQUEST;
    };

    tracing::info!(command = ?command, "Received a set-state request");

    match listener.shared.commands.try_send(command) {
        Ok(()) => StatusCode::OK,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = ?command, "Order buffer is full");
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(TrySendError::Closed(_)) => {
            tracing::warn!(command = ?command, "No device is reading orders");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Extracts the command from an order body, `None` if `targetState` is
/// missing or not a boolean.
fn parse_order(body: &str) -> Option<RemoteCommand> {
    serde_json::from_str::<StateOrder>(body)
        .ok()
        .map(|order| order.target_state.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_order_accepts_bool() {
        assert_eq!(parse_order(r#"{"targetState":true}"#), Some(RemoteCommand::On));
        assert_eq!(parse_order(r#"{"targetState": false}"#), Some(RemoteCommand::Off));
    }

    #[test]
    fn parse_order_rejects_malformed() {
        assert_eq!(parse_order(""), None);
        assert_eq!(parse_order(r#"{"targetState":"on"}"#), None);
        assert_eq!(parse_order(r#"{"state":true}"#), None);
        assert_eq!(parse_order("true"), None);
    }

    #[test]
    fn set_status_is_shared_between_clones() {
        let (listener, _rx) = StatusListener::new(SwitchState::Off);
        let other = listener.clone();
        other.set_status(SwitchState::On);
        assert_eq!(listener.status(), SwitchState::On);
    }

    #[tokio::test]
    async fn full_buffer_refuses_orders() {
        let (listener, mut rx) = StatusListener::new(SwitchState::Off);
        let order = r#"{"targetState":true}"#.to_string();

        for _ in 0..StatusListener::COMMAND_BUFFER {
            let status = handle_order(State(listener.clone()), order.clone()).await;
            assert_eq!(status, StatusCode::OK);
        }
        let status = handle_order(State(listener.clone()), order.clone()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        assert_eq!(rx.recv().await, Some(RemoteCommand::On));
        let status = handle_order(State(listener), order).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn default_addr_is_loopback() {
        assert_eq!(
            StatusListener::default_addr().to_string(),
            "127.0.0.1:8080"
        );
    }
}
