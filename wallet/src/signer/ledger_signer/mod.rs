// Copyright (c) 2024 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://spdx.org/licenses/MIT
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(feature = "ledger")]
pub mod ledger_messages;
pub mod session;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use async_trait::async_trait;

use common::{MessageSigningProtocol, NetworkKind};
use crypto::key::MessageSignature;

/// Status word reported while the device is locked.
pub const SW_DEVICE_LOCKED: u16 = 0x5515;
/// Status word reported when the wallet app is not open on the device
/// (or the device is busy with another host). Decimal 28160.
pub const SW_APP_NOT_OPEN: u16 = 0x6e00;
/// Cause word the app reports when the signing request refers to data it can
/// no longer sign, e.g. an already finalized order. Decimal 27012.
pub const CAUSE_DATA_INVALID: u32 = 0x6984;

/// Error surfaced by the device transport layer.
///
/// Raw transport/library errors are converted into this shape at the single
/// point where the device call is made; nothing above the signer inspects
/// library error types.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Device is locked")]
    Locked,
    #[error("Device returned status {0:#06x}")]
    Status(u16),
    #[error("Device rejected signing with cause {0}")]
    Cause(u32),
    #[error("Transport error: {0}")]
    Other(String),
}

/// Terminal failure classes of a hardware confirmation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareFailure {
    /// Transport could not be acquired, or the device is locked/busy.
    /// Retryable once the user sorts the device out.
    ConnectionFailed,
    /// The device refuses the request at the protocol layer; retrying will
    /// not help until the underlying data changes.
    TransactionInvalid,
    /// Everything else is treated as the user declining on the device.
    UserRejected,
}

/// Map a device error onto the failure class the confirmation surface shows.
pub fn classify_device_error(err: &DeviceError) -> HardwareFailure {
    match err {
        DeviceError::Locked => HardwareFailure::ConnectionFailed,
        DeviceError::Status(SW_APP_NOT_OPEN) => HardwareFailure::ConnectionFailed,
        DeviceError::Cause(CAUSE_DATA_INVALID) => HardwareFailure::TransactionInvalid,
        DeviceError::Status(_) | DeviceError::Cause(_) | DeviceError::Other(_) => {
            HardwareFailure::UserRejected
        }
    }
}

/// Everything the device needs to display and sign a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSignRequest {
    pub account_index: u32,
    pub address: String,
    pub network: NetworkKind,
    pub message: String,
    pub protocol: MessageSigningProtocol,
}

/// A live connection to a Ledger device.
#[async_trait]
pub trait LedgerTransport: Send {
    /// Run the signing exchange. Resolves when the user acts on the device;
    /// no host-side timeout is applied to the confirmation itself.
    async fn sign_message(
        &mut self,
        request: &DeviceSignRequest,
    ) -> Result<MessageSignature, DeviceError>;

    /// Release the underlying device connection.
    async fn close(&mut self);
}

/// Acquires transports to a physical device.
#[async_trait]
pub trait LedgerConnector: Send + Sync {
    type Transport: LedgerTransport;

    /// Try to open a transport; `None` when no usable device is present.
    /// Bounded by the transport library's own connection timeout.
    async fn connect(&self) -> Option<Self::Transport>;
}

#[async_trait]
impl<C: LedgerConnector> LedgerConnector for Arc<C> {
    type Transport = C::Transport;

    async fn connect(&self) -> Option<Self::Transport> {
        (**self).connect().await
    }
}
