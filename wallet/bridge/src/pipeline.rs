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

//! The assembled request pipeline: decode, validate, dispatch, follow up,
//! deliver.

use std::sync::Arc;

use logging::log;

use wallet::account::ResolvedAccount;
use wallet::seed_vault::SeedVault;
use wallet::signer::ledger_signer::LedgerConnector;
use wallet::signer::SignedMessage;

use crate::commands::{CommandSink, UiCommand};
use crate::config::BridgeConfig;
use crate::decoder::{decode_inbound, SigningRequest};
use crate::dispatch::SigningDispatcher;
use crate::messages::InboundSigningMessage;
use crate::orders::{CancelSellOrderRequest, FollowUpAction, OrdersApi};
use crate::responder::ResultChannel;
use crate::types::{FollowUpFailed, RequestError, RequestOutcome, WalletSnapshot};
use crate::validation::{validate_request, ValidationOutcome};

/// One pipeline instance serves the whole bridge; requests run through it
/// concurrently, each with its own state snapshot and result channel.
pub struct SigningPipeline<V, C, O> {
    dispatcher: SigningDispatcher<V, C>,
    orders: Arc<O>,
    commands: CommandSink,
}

impl<V, C, O> SigningPipeline<V, C, O>
where
    V: SeedVault,
    C: LedgerConnector,
    O: OrdersApi,
{
    pub fn new(dispatcher: SigningDispatcher<V, C>, orders: Arc<O>, commands: CommandSink) -> Self {
        Self {
            dispatcher,
            orders,
            commands,
        }
    }

    /// Assemble the pipeline from the service configuration.
    pub fn from_config(
        config: &BridgeConfig,
        vault: Arc<V>,
        connector: Arc<C>,
        orders: Arc<O>,
        commands: CommandSink,
    ) -> Self {
        let dispatcher = SigningDispatcher::new(vault, connector, config.ledger_settle_delay());
        Self::new(dispatcher, orders, commands)
    }

    /// Process one inbound bridge message end to end and deliver the outcome.
    pub async fn process(
        &self,
        snapshot: WalletSnapshot,
        message: InboundSigningMessage,
        channel: ResultChannel,
    ) {
        let outcome = match decode_inbound(&message) {
            Ok(request) => self.run(&snapshot, &request).await,
            Err(error) => RequestOutcome::Rejected(error),
        };
        channel.deliver(outcome);
    }

    /// Process an already-canonical request, e.g. one built by an in-app
    /// surface rather than decoded off the wire.
    pub async fn process_request(
        &self,
        snapshot: WalletSnapshot,
        request: SigningRequest,
        channel: ResultChannel,
    ) {
        let outcome = self.run(&snapshot, &request).await;
        channel.deliver(outcome);
    }

    async fn run(&self, snapshot: &WalletSnapshot, request: &SigningRequest) -> RequestOutcome {
        let ctx = snapshot.context();

        let resolved = match validate_request(&ctx, request) {
            ValidationOutcome::Valid(resolved) => resolved,
            ValidationOutcome::NetworkMismatch => {
                return RequestOutcome::Rejected(RequestError::NetworkMismatch);
            }
            ValidationOutcome::AddressMismatch => {
                return RequestOutcome::Rejected(RequestError::AddressMismatch);
            }
        };

        // Later signing steps act on the resolved account; ask wallet state
        // to make it the active one.
        self.commands.emit(UiCommand::SwitchAccount {
            account_index: resolved.account.account_index,
        });

        let signed = match self.dispatcher.dispatch(ctx.network, request, &resolved).await {
            Ok(signed) => signed,
            Err(error) => return RequestOutcome::Rejected(error),
        };

        let follow_up = match FollowUpAction::from_extra_params(request.extra_params.as_ref()) {
            Some(action) => self.submit_follow_up(action, &resolved, &signed).await.err(),
            None => None,
        };

        RequestOutcome::Signed {
            result: signed,
            follow_up,
        }
    }

    async fn submit_follow_up(
        &self,
        action: FollowUpAction,
        resolved: &ResolvedAccount<'_>,
        signed: &SignedMessage,
    ) -> Result<(), FollowUpFailed> {
        match action {
            FollowUpAction::CancelSellOrder { order_ids, token } => {
                let request = CancelSellOrderRequest {
                    order_ids,
                    maker_public_key: resolved.account.ordinals_public_key.clone(),
                    maker_address: resolved.account.ordinals_address.clone(),
                    token,
                    signature: signed.signature_base64(),
                };
                self.orders.submit_cancel_sell_order(request).await.map_err(|err| {
                    log::warn!("Follow-up submission failed after a good signature: {err}");
                    FollowUpFailed(err.to_string())
                })
            }
        }
    }
}
