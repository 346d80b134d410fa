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

//! The follow-up collaborator: order cancellations submitted with a fresh
//! signature.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrdersApiError {
    #[error("Orders API request failed: {0}")]
    Request(String),
}

/// Cancellation of sell listings, authorized by the maker's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSellOrderRequest {
    pub order_ids: Vec<String>,
    pub maker_public_key: String,
    pub maker_address: String,
    pub token: String,
    pub signature: String,
}

/// Submits order operations to the marketplace backend.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn submit_cancel_sell_order(
        &self,
        request: CancelSellOrderRequest,
    ) -> Result<(), OrdersApiError>;
}

/// A follow-up action a request carries beyond the signature itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpAction {
    CancelSellOrder { order_ids: Vec<String>, token: String },
}

impl FollowUpAction {
    /// Recognize a follow-up in a request's extra params: order ids plus the
    /// marketplace API token.
    pub fn from_extra_params(extra: Option<&BTreeMap<String, Value>>) -> Option<Self> {
        let extra = extra?;
        let order_ids = extra
            .get("orderIds")?
            .as_array()?
            .iter()
            .map(|id| id.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        let token = extra.get("token")?.as_str()?.to_string();
        Some(FollowUpAction::CancelSellOrder { order_ids, token })
    }
}
