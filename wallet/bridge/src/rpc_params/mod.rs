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

//! Structural schemas of the RPC methods the bridge accepts.
//!
//! Each method declares its wire contract here: required fields, accepted
//! type unions, optional fields. Validation is purely structural; semantic
//! checks (balances, address ownership) belong to later pipeline stages.

pub mod sign_message;
pub mod transfer;

use serde_json::Value;

/// Accepted JSON type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    StringOrNumber,
}

impl FieldType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::StringOrNumber => value.is_string() || value.is_number(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

/// A method's parameter schema.
pub struct ParamSchema {
    pub method: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ParamSchema {
    /// Check `params` against the schema; on violation returns the first
    /// offending field, in declaration order.
    pub fn validate(&self, params: &Value) -> Result<(), &'static str> {
        let object = match params.as_object() {
            Some(object) => object,
            None => {
                return Err(self.fields.first().map_or("params", |field| field.name));
            }
        };

        for field in self.fields {
            match object.get(field.name) {
                Some(value) => {
                    if !field.ty.accepts(value) {
                        return Err(field.name);
                    }
                }
                None => {
                    if field.required {
                        return Err(field.name);
                    }
                }
            }
        }
        Ok(())
    }
}
