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

use serde::{Deserialize, Serialize};

/// Message-signing scheme requested by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageSigningProtocol {
    /// Recoverable ECDSA over the classic signed-message digest.
    Ecdsa,
    /// BIP340 Schnorr over the BIP322 message digest.
    Bip322,
}

impl MessageSigningProtocol {
    /// Scheme used when a request does not name one.
    pub const DEFAULT: Self = MessageSigningProtocol::Bip322;
}
