// Copyright (c) 2023 RBB S.r.l
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

//! Segwit address encoding for the two address families the wallet exposes:
//! bech32 P2WPKH payment addresses and bech32m P2TR ordinals addresses.

use bech32::segwit;

use crate::network::NetworkKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address encoding failed: {0}")]
    Encoding(String),
}

/// Encode a pay-to-witness-public-key-hash address (segwit v0).
pub fn encode_p2wpkh(network: NetworkKind, pubkey_hash: &[u8; 20]) -> Result<String, AddressError> {
    segwit::encode_v0(network.bech32_hrp(), pubkey_hash)
        .map_err(|err| AddressError::Encoding(err.to_string()))
}

/// Encode a pay-to-taproot address (segwit v1) from the tweaked output key.
pub fn encode_p2tr(network: NetworkKind, output_key: &[u8; 32]) -> Result<String, AddressError> {
    segwit::encode_v1(network.bech32_hrp(), output_key)
        .map_err(|err| AddressError::Encoding(err.to_string()))
}
