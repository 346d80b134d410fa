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

use bech32::Hrp;
use serde::{Deserialize, Serialize};

/// The Bitcoin network a request or an account is bound to.
///
/// The wire representation matches the `network.type` strings used by dApp
/// callers, e.g. `"Mainnet"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum NetworkKind {
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl NetworkKind {
    /// Human readable part used by this network's segwit addresses.
    pub fn bech32_hrp(&self) -> Hrp {
        match self {
            NetworkKind::Mainnet => bech32::hrp::BC,
            NetworkKind::Testnet | NetworkKind::Signet => bech32::hrp::TB,
            NetworkKind::Regtest => bech32::hrp::BCRT,
        }
    }

    /// BIP44 coin type used when deriving keys for this network.
    pub fn bip44_coin_type(&self) -> u32 {
        match self {
            NetworkKind::Mainnet => 0,
            NetworkKind::Testnet | NetworkKind::Signet | NetworkKind::Regtest => 1,
        }
    }
}
