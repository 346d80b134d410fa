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

use std::ops::ControlFlow;
use std::sync::Arc;

use logging::log;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use wallet::seed_vault::SeedVault;
use wallet::signer::ledger_signer::LedgerConnector;

use crate::messages::InboundSigningMessage;
use crate::orders::OrdersApi;
use crate::pipeline::SigningPipeline;
use crate::responder::{ResponsePort, ResultChannel};
use crate::types::WalletStateReader;

/// A freshly connected two-way message port.
pub struct PortConnection {
    /// Port name announced by the connecting context.
    pub name: String,
    pub messages: mpsc::UnboundedReceiver<InboundSigningMessage>,
    pub responses: ResponsePort,
}

/// Commands to control the bridge service task.
pub enum ServiceCommand {
    /// Shutdown the service task.
    Stop,
}

/// Represents the bridge worker task. It accepts port connections and runs
/// each inbound request through the signing pipeline.
pub struct BridgeWorker<V, C, O> {
    pipeline: Arc<SigningPipeline<V, C, O>>,
    wallet_state: Arc<dyn WalletStateReader>,
    port_name: String,
    connections_rx: mpsc::UnboundedReceiver<PortConnection>,
    command_rx: mpsc::UnboundedReceiver<ServiceCommand>,
}

impl<V, C, O> BridgeWorker<V, C, O>
where
    V: SeedVault + 'static,
    C: LedgerConnector + 'static,
    C::Transport: 'static,
    O: OrdersApi + 'static,
{
    pub fn new(
        pipeline: Arc<SigningPipeline<V, C, O>>,
        wallet_state: Arc<dyn WalletStateReader>,
        port_name: String,
        connections_rx: mpsc::UnboundedReceiver<PortConnection>,
        command_rx: mpsc::UnboundedReceiver<ServiceCommand>,
    ) -> Self {
        Self {
            pipeline,
            wallet_state,
            port_name,
            connections_rx,
            command_rx,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.event_loop())
    }

    async fn event_loop(mut self) {
        loop {
            tokio::select! {
                // Give priority to service commands
                biased;

                command = self.command_rx.recv() => {
                    match self.process_command(command) {
                        ControlFlow::Continue(()) => (),
                        ControlFlow::Break(()) => break,
                    }
                }

                connection = self.connections_rx.recv() => {
                    match connection {
                        Some(connection) => self.accept_connection(connection),
                        None => {
                            log::warn!("Connection channel closed unexpectedly; stopping");
                            break;
                        }
                    }
                }
            }
        }
    }

    fn process_command(&mut self, command: Option<ServiceCommand>) -> ControlFlow<()> {
        match command {
            Some(ServiceCommand::Stop) => {
                log::info!("Bridge service terminating upon request");
                ControlFlow::Break(())
            }
            None => {
                log::warn!("Bridge service channel closed; stopping");
                ControlFlow::Break(())
            }
        }
    }

    /// Ports other than the content script's are not ours to answer.
    fn accept_connection(&self, connection: PortConnection) {
        if connection.name != self.port_name {
            log::debug!("Ignoring connection on port {}", connection.name);
            return;
        }

        let pipeline = self.pipeline.clone();
        let wallet_state = self.wallet_state.clone();
        let responses = connection.responses;
        let mut messages = connection.messages;

        tokio::spawn(async move {
            while let Some(message) = messages.recv().await {
                let channel = ResultChannel::for_message(&message, responses.clone());
                let snapshot = wallet_state.snapshot();
                let pipeline = pipeline.clone();
                // Independently arriving requests overlap freely; only the
                // hardware session slot is exclusive.
                tokio::spawn(async move {
                    pipeline.process(snapshot, message, channel).await;
                });
            }
            log::debug!("Content-script port disconnected");
        });
    }
}
