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

//! Normalizes both inbound request encodings into one canonical shape.
//!
//! Dispatch is on token presence: a non-empty legacy token wins, anything
//! else must be a well-formed RPC envelope. The decoder is a pure transform;
//! wallet state never enters here.

use std::collections::BTreeMap;

use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use common::{MessageSigningProtocol, NetworkKind};

use crate::messages::{infer_legacy_message, InboundSigningMessage, RpcMethod};
use crate::rpc_params::{sign_message, transfer};
use crate::types::RequestError;

/// Canonical signing request, produced once per inbound message and immutable
/// from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// Target address; empty for active-account operations such as
    /// transfers, which do not name one.
    pub address: String,
    pub message: String,
    pub protocol: MessageSigningProtocol,
    /// Network the caller believes it is on, when declared.
    pub network: Option<NetworkKind>,
    pub request_id: String,
    pub tab_id: String,
    /// The raw legacy token, kept for response correlation.
    pub origin_token: Option<String>,
    /// Method-specific leftovers (order ids, API tokens, transfer params).
    pub extra_params: Option<BTreeMap<String, Value>>,
}

/// The options object carried inside a legacy token.
#[derive(Debug, Clone, Deserialize)]
struct LegacyTokenClaims {
    payload: LegacyPayload,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyPayload {
    address: String,
    message: String,
    #[serde(default)]
    network: Option<LegacyNetworkSpec>,
    #[serde(default)]
    protocol: Option<MessageSigningProtocol>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyNetworkSpec {
    #[serde(rename = "type")]
    kind: NetworkKind,
}

/// Decode an inbound message into the canonical request.
pub fn decode_inbound(message: &InboundSigningMessage) -> Result<SigningRequest, RequestError> {
    if infer_legacy_message(message) {
        let token = message.sign_message_request.as_deref().unwrap_or_default();
        decode_legacy_token(message, token)
    } else {
        decode_rpc_envelope(message)
    }
}

fn decode_legacy_token(
    message: &InboundSigningMessage,
    token: &str,
) -> Result<SigningRequest, RequestError> {
    let claims = decode_request_token(token)?;
    let payload = claims.payload;

    Ok(SigningRequest {
        address: payload.address,
        message: payload.message,
        protocol: payload.protocol.unwrap_or(MessageSigningProtocol::DEFAULT),
        network: payload.network.map(|spec| spec.kind),
        request_id: message.request_id.clone(),
        tab_id: message.tab_id.clone(),
        origin_token: Some(token.to_string()),
        extra_params: (!payload.extra.is_empty()).then_some(payload.extra),
    })
}

/// Decode the middle segment of a `header.payload.signature` token.
fn decode_request_token(token: &str) -> Result<LegacyTokenClaims, RequestError> {
    let mut segments = token.split('.');
    let payload_segment = segments
        .nth(1)
        .ok_or_else(|| malformed("request token has no payload segment"))?;
    if segments.next().is_none() {
        return Err(malformed("request token has no signature segment"));
    }

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload_segment)
        .map_err(|_| malformed("request token payload is not base64url"))?;
    serde_json::from_slice(&bytes)
        .map_err(|_| malformed("request token payload is not a signing request"))
}

fn decode_rpc_envelope(message: &InboundSigningMessage) -> Result<SigningRequest, RequestError> {
    let method = message.method.ok_or_else(|| malformed("missing method"))?;
    let params = message.payload.as_ref().ok_or_else(|| malformed("missing params"))?;

    match method {
        RpcMethod::SignMessage => {
            sign_message::SCHEMA
                .validate(params)
                .map_err(|field| RequestError::InvalidParams(field.to_string()))?;
            let params: sign_message::SignMessageParams = serde_json::from_value(params.clone())
                .map_err(|_| malformed("sign message params do not deserialize"))?;

            Ok(SigningRequest {
                address: params.address,
                message: params.message,
                protocol: params.protocol.unwrap_or(MessageSigningProtocol::DEFAULT),
                network: None,
                request_id: message.request_id.clone(),
                tab_id: message.tab_id.clone(),
                origin_token: None,
                extra_params: None,
            })
        }
        RpcMethod::TransferStx => {
            transfer::SCHEMA
                .validate(params)
                .map_err(|field| RequestError::InvalidParams(field.to_string()))?;
            let typed: transfer::TransferStxParams = serde_json::from_value(params.clone())
                .map_err(|_| malformed("transfer params do not deserialize"))?;

            // Transfers are active-account operations: no target address is
            // named, the confirmation surface signs off on the canonical
            // params rendering.
            let canonical = serde_json::to_value(&typed)
                .map_err(|err| malformed(&err.to_string()))?;
            let extra = canonical
                .as_object()
                .map(|object| object.clone().into_iter().collect::<BTreeMap<_, _>>());

            Ok(SigningRequest {
                address: String::new(),
                message: canonical.to_string(),
                protocol: MessageSigningProtocol::Ecdsa,
                network: None,
                request_id: message.request_id.clone(),
                tab_id: message.tab_id.clone(),
                origin_token: None,
                extra_params: extra,
            })
        }
    }
}

fn malformed(reason: &str) -> RequestError {
    RequestError::MalformedRequest(reason.to_string())
}
