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

use async_trait::async_trait;
use zeroize::Zeroizing;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedVaultError {
    #[error("Seed vault is locked")]
    Locked,
    #[error("Seed vault access failed: {0}")]
    Access(String),
}

/// Scoped access to the wallet's master seed phrase.
///
/// Each reveal is single-use: the phrase must be consumed within the same
/// continuation and dropped before the next suspension point. Implementations
/// must not hand out cached copies.
#[async_trait]
pub trait SeedVault: Send + Sync {
    async fn reveal_seed(&self) -> Result<Zeroizing<String>, SeedVaultError>;
}
