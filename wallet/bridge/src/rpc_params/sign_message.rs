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

use serde::Deserialize;

use common::MessageSigningProtocol;

use super::{FieldSpec, FieldType, ParamSchema};

pub const SCHEMA: ParamSchema = ParamSchema {
    method: "signMessage",
    fields: &[
        FieldSpec {
            name: "address",
            ty: FieldType::String,
            required: true,
        },
        FieldSpec {
            name: "message",
            ty: FieldType::String,
            required: true,
        },
        FieldSpec {
            name: "protocol",
            ty: FieldType::String,
            required: false,
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignMessageParams {
    pub address: String,
    pub message: String,
    #[serde(default)]
    pub protocol: Option<MessageSigningProtocol>,
}
