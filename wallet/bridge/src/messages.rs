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

//! Wire shapes exchanged with the content script.

use serde::{Deserialize, Serialize};

use common::MessageSigningProtocol;

/// Name of the two-way port the content script connects on.
pub const CONTENT_SCRIPT_PORT: &str = "wallet-content-script";

/// RPC methods the bridge accepts in the newer envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcMethod {
    #[serde(rename = "signMessage")]
    SignMessage,
    #[serde(rename = "stx_transferStx")]
    TransferStx,
}

/// A signing request as it arrives from the content script.
///
/// Both supported encodings travel in this shape: legacy requests carry the
/// whole options object inside `sign_message_request` (a signed token), RPC
/// requests carry `method` plus `payload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundSigningMessage {
    pub request_id: String,
    pub tab_id: String,
    /// Legacy signed-token request; wins over the RPC fields when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_message_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<RpcMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// Whether a message uses the legacy encoded-token format.
pub fn infer_legacy_message(message: &InboundSigningMessage) -> bool {
    message.sign_message_request.as_deref().is_some_and(|token| !token.is_empty())
}

/// The reply posted back on the originating port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeResponse {
    pub request_id: String,
    pub tab_id: String,
    /// Echo of the legacy request token, for dApp-side correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_token: Option<String>,
    pub result: BridgeResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BridgeResult {
    #[serde(rename_all = "camelCase")]
    Signature {
        address: String,
        signature: String,
        protocol: MessageSigningProtocol,
        /// Present when the post-signing follow-up call failed.
        #[serde(skip_serializing_if = "Option::is_none")]
        follow_up_error: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Error { code: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_inference() {
        let mut message = InboundSigningMessage::default();
        assert!(!infer_legacy_message(&message));

        message.sign_message_request = Some(String::new());
        assert!(!infer_legacy_message(&message));

        message.sign_message_request = Some("header.payload.sig".to_string());
        assert!(infer_legacy_message(&message));
    }

    #[test]
    fn inbound_field_names_are_camel_case() {
        let message: InboundSigningMessage = serde_json::from_str(
            r#"{"requestId": "r-1", "tabId": "7", "method": "signMessage", "payload": {}}"#,
        )
        .unwrap();
        assert_eq!(message.request_id, "r-1");
        assert_eq!(message.tab_id, "7");
        assert_eq!(message.method, Some(RpcMethod::SignMessage));
    }
}
