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

use crate::hw_data::HardwareWalletData;

pub type AccountIndex = u32;

/// A single wallet account as the signing pipeline sees it.
///
/// Accounts are owned by wallet-wide state; the pipeline only reads them.
/// Software accounts derive their keys from the wallet seed at
/// `account_index`; hardware accounts keep their keys on the device described
/// by `hardware`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_index: AccountIndex,
    /// Payment (segwit v0) address.
    pub btc_address: String,
    /// Ordinals (taproot) address.
    pub ordinals_address: String,
    /// Stacks address; carried for display, never scanned for signing.
    pub stx_address: String,
    /// Compressed public key behind `ordinals_address`, hex encoded.
    pub ordinals_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareWalletData>,
}

impl Account {
    pub fn is_hardware(&self) -> bool {
        self.hardware.is_some()
    }

    /// Key slot on the signing device, for hardware accounts only.
    pub fn device_account_index(&self) -> Option<AccountIndex> {
        self.hardware.as_ref().map(|data| match data {
            HardwareWalletData::Ledger(ledger) => ledger.device_account_index,
        })
    }
}
