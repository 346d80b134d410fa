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

use serde::{Deserialize, Serialize};

use super::{FieldSpec, FieldType, ParamSchema};

pub const SCHEMA: ParamSchema = ParamSchema {
    method: "stx_transferStx",
    fields: &[
        FieldSpec {
            name: "amount",
            ty: FieldType::StringOrNumber,
            required: true,
        },
        FieldSpec {
            name: "recipient",
            ty: FieldType::String,
            required: true,
        },
        FieldSpec {
            name: "memo",
            ty: FieldType::String,
            required: false,
        },
    ],
};

/// An amount as callers send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountArg {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStxParams {
    pub amount: AmountArg,
    pub recipient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}
