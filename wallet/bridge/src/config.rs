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

use std::time::Duration;

use serde::Deserialize;

use crate::messages::CONTENT_SCRIPT_PORT;

/// Static configuration of the bridge service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Port name the content script connects on.
    pub content_script_port: String,
    /// Settling delay between Ledger transport acquisition and the first
    /// exchange, in milliseconds.
    pub ledger_settle_delay_ms: u64,
}

impl BridgeConfig {
    pub fn ledger_settle_delay(&self) -> Duration {
        Duration::from_millis(self.ledger_settle_delay_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            content_script_port: CONTENT_SCRIPT_PORT.to_string(),
            ledger_settle_delay_ms: 1500,
        }
    }
}
