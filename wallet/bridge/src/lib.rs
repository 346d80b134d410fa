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

//! The signing-request pipeline behind the extension's content-script bridge.
//!
//! Inbound requests, whether the legacy signed-token shape or the newer RPC
//! envelope, are normalized to one canonical request, validated against
//! wallet state, dispatched to the software or hardware signing path and
//! answered exactly once on the channel they arrived on.

pub mod commands;
pub mod config;
pub mod decoder;
pub mod dispatch;
pub mod messages;
pub mod orders;
pub mod pipeline;
pub mod responder;
pub mod rpc_params;
pub mod service;
pub mod types;
pub mod validation;

pub use config::BridgeConfig;
pub use decoder::SigningRequest;
pub use pipeline::SigningPipeline;
pub use types::{RequestError, RequestOutcome, WalletSnapshot, WalletStateReader};
