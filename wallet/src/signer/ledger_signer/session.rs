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

//! The hardware confirmation session: connect, settle, confirm, classify.

use std::time::Duration;

use logging::log;

use crypto::key::MessageSignature;

use super::{
    classify_device_error, DeviceSignRequest, HardwareFailure, LedgerConnector, LedgerTransport,
};

/// Wait after transport acquisition before the first exchange; the device UI
/// needs time to present.
pub const DEVICE_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Where a confirmation session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Idle,
    Connecting,
    Connected,
    Confirming,
    Succeeded,
    Failed(HardwareFailure),
}

impl SessionStep {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStep::Succeeded | SessionStep::Failed(_))
    }
}

/// One in-flight hardware confirmation.
///
/// A session is owned by exactly one pending request and is driven from a
/// single task; the confirmation surface calls `connect`, `confirm_sign`,
/// `reset_for_retry` and `cancel` in response to user actions. The transport
/// handle is released on every exit path, so a session can always be retried
/// or dropped without blocking later attempts.
pub struct LedgerSession<C: LedgerConnector> {
    connector: C,
    settle_delay: Duration,
    step: SessionStep,
    transport: Option<C::Transport>,
}

impl<C: LedgerConnector> LedgerSession<C> {
    pub fn new(connector: C) -> Self {
        Self::with_settle_delay(connector, DEVICE_SETTLE_DELAY)
    }

    pub fn with_settle_delay(connector: C, settle_delay: Duration) -> Self {
        Self {
            connector,
            settle_delay,
            step: SessionStep::Idle,
            transport: None,
        }
    }

    pub fn step(&self) -> SessionStep {
        self.step
    }

    /// Acquire a transport and wait out the settling delay.
    ///
    /// Any transport left over from a previous attempt is torn down first; a
    /// session never holds two device connections.
    pub async fn connect(&mut self) -> Result<(), HardwareFailure> {
        self.release_transport().await;
        self.step = SessionStep::Connecting;

        match self.connector.connect().await {
            Some(transport) => {
                self.transport = Some(transport);
                tokio::time::sleep(self.settle_delay).await;
                self.step = SessionStep::Connected;
                Ok(())
            }
            None => {
                log::warn!("Ledger transport could not be acquired");
                self.step = SessionStep::Failed(HardwareFailure::ConnectionFailed);
                Err(HardwareFailure::ConnectionFailed)
            }
        }
    }

    /// Run the device signing exchange and classify the result.
    ///
    /// Only legal from `Connected`. The transport is closed before this
    /// returns, whatever the outcome.
    pub async fn confirm_sign(
        &mut self,
        request: &DeviceSignRequest,
    ) -> Result<MessageSignature, HardwareFailure> {
        let mut transport = match (self.step, self.transport.take()) {
            (SessionStep::Connected, Some(transport)) => transport,
            (_, leftover) => {
                log::error!("Confirmation requested without a connected device");
                self.transport = leftover;
                self.release_transport().await;
                self.step = SessionStep::Failed(HardwareFailure::ConnectionFailed);
                return Err(HardwareFailure::ConnectionFailed);
            }
        };

        self.step = SessionStep::Confirming;
        let result = transport.sign_message(request).await;
        transport.close().await;

        match result {
            Ok(signature) => {
                self.step = SessionStep::Succeeded;
                Ok(signature)
            }
            Err(err) => {
                let failure = classify_device_error(&err);
                log::debug!("Device signing failed: {err} (classified as {failure:?})");
                self.step = SessionStep::Failed(failure);
                Err(failure)
            }
        }
    }

    /// Explicit user-initiated retry: clear the failure and return to `Idle`
    /// so the next `connect` starts from scratch.
    pub async fn reset_for_retry(&mut self) {
        self.release_transport().await;
        self.step = SessionStep::Idle;
    }

    /// The user closed the confirmation surface.
    ///
    /// Safe to call from any state, any number of times; terminal steps stay
    /// as they are, a pending attempt is abandoned back to `Idle`. The
    /// transport never stays open past this call.
    pub async fn cancel(&mut self) {
        self.release_transport().await;
        if !self.step.is_terminal() {
            self.step = SessionStep::Idle;
        }
    }

    async fn release_transport(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await;
        }
    }
}
