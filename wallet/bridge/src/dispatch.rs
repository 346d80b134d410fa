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

//! Chooses and drives the signing path for a validated request.

use std::sync::Arc;
use std::time::Duration;

use logging::log;
use tokio::sync::Semaphore;

use common::{MessageSigningProtocol, NetworkKind};
use wallet::account::ResolvedAccount;
use wallet::seed_vault::SeedVault;
use wallet::signer::ledger_signer::session::LedgerSession;
use wallet::signer::ledger_signer::{DeviceSignRequest, LedgerConnector};
use wallet::signer::software_signer::SoftwareSigner;
use wallet::signer::SignedMessage;

use crate::decoder::SigningRequest;
use crate::types::RequestError;

/// Routes validated requests to the software seed path or the hardware
/// confirmation flow.
///
/// Hardware confirmations are exclusive: the single session slot rejects a
/// second concurrent attempt before the device is touched. A user-initiated
/// retry simply dispatches again, which re-enters the session at `Idle`.
pub struct SigningDispatcher<V, C> {
    vault: Arc<V>,
    connector: Arc<C>,
    hardware_slot: Arc<Semaphore>,
    settle_delay: Duration,
}

impl<V: SeedVault, C: LedgerConnector> SigningDispatcher<V, C> {
    pub fn new(vault: Arc<V>, connector: Arc<C>, settle_delay: Duration) -> Self {
        Self {
            vault,
            connector,
            hardware_slot: Arc::new(Semaphore::new(1)),
            settle_delay,
        }
    }

    pub async fn dispatch(
        &self,
        network: NetworkKind,
        request: &SigningRequest,
        resolved: &ResolvedAccount<'_>,
    ) -> Result<SignedMessage, RequestError> {
        let account = resolved.account;
        let address = signing_address(request, resolved);

        if account.is_hardware() {
            self.dispatch_hardware(network, request, resolved, address).await
        } else {
            SoftwareSigner::new(self.vault.as_ref(), network)
                .sign_message(account, &address, &request.message, request.protocol)
                .await
                .map_err(|err| RequestError::SigningFailed(err.to_string()))
        }
    }

    async fn dispatch_hardware(
        &self,
        network: NetworkKind,
        request: &SigningRequest,
        resolved: &ResolvedAccount<'_>,
        address: String,
    ) -> Result<SignedMessage, RequestError> {
        // One confirmation at a time; a competing request must not wake the
        // device mid-flow.
        let _slot = self.hardware_slot.clone().try_acquire_owned().map_err(|_| {
            log::info!("Hardware confirmation refused: another one is in flight");
            RequestError::ConnectionFailed
        })?;

        let device_index = resolved
            .account
            .device_account_index()
            .ok_or_else(|| RequestError::SigningFailed("hardware account has no device slot".to_string()))?;

        let mut session = LedgerSession::with_settle_delay(self.connector.clone(), self.settle_delay);
        session.connect().await?;
        let signature = session
            .confirm_sign(&DeviceSignRequest {
                account_index: device_index,
                address: address.clone(),
                network,
                message: request.message.clone(),
                protocol: request.protocol,
            })
            .await?;

        Ok(SignedMessage { address, signature })
    }
}

/// The address the signature is produced for: the one the request names, or
/// the resolved account's address for the requested scheme.
fn signing_address(request: &SigningRequest, resolved: &ResolvedAccount<'_>) -> String {
    if !request.address.is_empty() {
        return request.address.clone();
    }
    match request.protocol {
        MessageSigningProtocol::Ecdsa => resolved.account.btc_address.clone(),
        MessageSigningProtocol::Bip322 => resolved.account.ordinals_address.clone(),
    }
}
