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

pub mod hash;
pub mod key;

use zeroize::Zeroizing;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid seed phrase")]
    InvalidPhrase,
}

/// Turn a BIP39 seed phrase into the 64-byte wallet seed.
///
/// The returned buffer is wiped on drop; callers must not copy it out of the
/// zeroizing wrapper.
pub fn seed_from_mnemonic(
    phrase: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; 64]>, MnemonicError> {
    let mnemonic =
        bip39::Mnemonic::parse_normalized(phrase).map_err(|_| MnemonicError::InvalidPhrase)?;
    Ok(Zeroizing::new(mnemonic.to_seed_normalized(passphrase)))
}
