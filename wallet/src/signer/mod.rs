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

pub mod ledger_signer;
pub mod software_signer;

use base64::Engine;

use common::address::AddressError;
use crypto::key::hdkd::DerivationError;
use crypto::key::SignatureError;
use crypto::MnemonicError;

use crate::seed_vault::SeedVaultError;

pub use crypto::key::MessageSignature;

/// Signer errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    #[error("Seed vault error: {0}")]
    SeedVault(#[from] SeedVaultError),
    #[error("Seed phrase error: {0}")]
    Mnemonic(#[from] MnemonicError),
    #[error("Key derivation error: {0}")]
    KeyDerivation(#[from] DerivationError),
    #[error("Signature construction error: {0}")]
    Signature(#[from] SignatureError),
    #[error("Address encoding error: {0}")]
    Address(#[from] AddressError),
    #[error("Address {0} does not belong to the signing account")]
    AddressNotOwned(String),
}

/// Result type used for the signers
pub type SignerResult<T> = Result<T, SignerError>;

/// The product of a completed signing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// Address the signature was produced for.
    pub address: String,
    pub signature: MessageSignature,
}

impl SignedMessage {
    /// Signature bytes in the base64 form callers expect on the wire.
    pub fn signature_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.signature.as_bytes())
    }
}
