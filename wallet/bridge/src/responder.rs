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

//! Delivery of the one terminal outcome every request gets.

use logging::log;
use tokio::sync::mpsc;

use common::MessageSigningProtocol;
use wallet::signer::MessageSignature;

use crate::commands::{CommandSink, ToastKind, UiCommand};
use crate::messages::{BridgeResponse, BridgeResult, InboundSigningMessage};
use crate::types::RequestOutcome;

/// Sending half of the message port a request arrived on.
#[derive(Debug, Clone)]
pub struct ResponsePort(mpsc::UnboundedSender<BridgeResponse>);

impl ResponsePort {
    pub fn new(sender: mpsc::UnboundedSender<BridgeResponse>) -> Self {
        Self(sender)
    }

    fn post(&self, response: BridgeResponse) {
        if self.0.send(response).is_err() {
            log::warn!("Response port closed before the result was delivered");
        }
    }
}

/// Where a request's outcome goes. Consumed on delivery, so answering twice
/// is unrepresentable.
pub enum ResultChannel {
    /// Post the outcome back over the originating content-script port.
    ContentScript {
        port: ResponsePort,
        request_id: String,
        tab_id: String,
        origin_token: Option<String>,
    },
    /// No external caller: completion drives local UI commands instead.
    InApp { commands: CommandSink },
}

impl ResultChannel {
    /// Channel answering a content-script message, correlation ids included.
    pub fn for_message(message: &InboundSigningMessage, port: ResponsePort) -> Self {
        ResultChannel::ContentScript {
            port,
            request_id: message.request_id.clone(),
            tab_id: message.tab_id.clone(),
            origin_token: message.sign_message_request.clone().filter(|token| !token.is_empty()),
        }
    }

    pub fn deliver(self, outcome: RequestOutcome) {
        match self {
            ResultChannel::ContentScript {
                port,
                request_id,
                tab_id,
                origin_token,
            } => {
                let result = match outcome {
                    RequestOutcome::Signed { result, follow_up } => BridgeResult::Signature {
                        address: result.address.clone(),
                        signature: result.signature_base64(),
                        protocol: match result.signature {
                            MessageSignature::RecoverableEcdsa(_) => MessageSigningProtocol::Ecdsa,
                            MessageSignature::Schnorr(_) => MessageSigningProtocol::Bip322,
                        },
                        follow_up_error: follow_up.map(|failure| failure.to_string()),
                    },
                    RequestOutcome::Rejected(error) => BridgeResult::Error {
                        code: error.code().to_string(),
                        message: error.to_string(),
                    },
                };
                port.post(BridgeResponse {
                    request_id,
                    tab_id,
                    source_token: origin_token,
                    result,
                });
            }
            ResultChannel::InApp { commands } => match outcome {
                RequestOutcome::Signed { follow_up, .. } => {
                    commands.emit(UiCommand::NavigateBack);
                    commands.emit(UiCommand::Toast(ToastKind::UnlistSuccess));
                    if let Some(failure) = follow_up {
                        commands.emit(UiCommand::FollowUpFailed(failure.to_string()));
                    }
                }
                RequestOutcome::Rejected(error) => {
                    log::debug!("In-app signing request rejected: {error}");
                    commands.emit(UiCommand::Toast(ToastKind::UnlistError));
                }
            },
        }
    }
}
