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

//! Hierarchical deterministic key derivation (BIP32, private keys only).

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use secp256k1::{Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::key::PrivateKey;

type HmacSha512 = Hmac<Sha512>;

const HARDENED_OFFSET: u32 = 0x8000_0000;
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),
    #[error("Derived key is not usable")]
    UnusableKey,
}

/// A single derivation step, hardened or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNumber(u32);

impl ChildNumber {
    pub fn hardened(index: u32) -> Self {
        debug_assert!(index < HARDENED_OFFSET);
        ChildNumber(index | HARDENED_OFFSET)
    }

    pub fn normal(index: u32) -> Self {
        debug_assert!(index < HARDENED_OFFSET);
        ChildNumber(index)
    }

    pub fn is_hardened(&self) -> bool {
        self.0 & HARDENED_OFFSET != 0
    }

    /// The index as it enters the HMAC, hardened bit included.
    pub fn encoded(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.0 & !HARDENED_OFFSET)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn new(steps: Vec<ChildNumber>) -> Self {
        DerivationPath(steps)
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl FromStr for DerivationPath {
    type Err = DerivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let prefix = parts.next();
        if prefix != Some("m") {
            return Err(DerivationError::InvalidPath(s.to_string()));
        }

        let steps = parts
            .map(|part| {
                let (digits, hardened) = match part.strip_suffix(['\'', 'h']) {
                    Some(digits) => (digits, true),
                    None => (part, false),
                };
                let index: u32 = digits
                    .parse()
                    .ok()
                    .filter(|idx| *idx < HARDENED_OFFSET)
                    .ok_or_else(|| DerivationError::InvalidPath(s.to_string()))?;
                Ok(if hardened {
                    ChildNumber::hardened(index)
                } else {
                    ChildNumber::normal(index)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DerivationPath(steps))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for step in &self.0 {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

/// A private key with its chain code, derivable into children.
pub struct ExtendedPrivateKey {
    key: SecretKey,
    chain_code: [u8; 32],
}

impl ExtendedPrivateKey {
    /// Build the master key from a wallet seed.
    pub fn new_master(seed: &[u8]) -> Result<Self, DerivationError> {
        let mut mac = HmacSha512::new_from_slice(MASTER_KEY_DOMAIN)
            .expect("HMAC accepts any key length");
        mac.update(seed);
        Self::from_hmac_output(&mac.finalize().into_bytes())
    }

    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, DerivationError> {
        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .expect("HMAC accepts any key length");
        if child.is_hardened() {
            mac.update(&[0]);
            mac.update(&self.key.secret_bytes());
        } else {
            let secp = Secp256k1::new();
            mac.update(&self.key.public_key(&secp).serialize());
        }
        mac.update(&child.encoded().to_be_bytes());

        let output = mac.finalize().into_bytes();
        let tweak_bytes: [u8; 32] =
            output[..32].try_into().expect("HMAC-SHA512 output splits into halves");
        let tweak =
            Scalar::from_be_bytes(tweak_bytes).map_err(|_| DerivationError::UnusableKey)?;
        let key = self.key.add_tweak(&tweak).map_err(|_| DerivationError::UnusableKey)?;

        let mut derived = Self::from_hmac_output(&output)?;
        derived.key = key;
        Ok(derived)
    }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, DerivationError> {
        path.as_slice()
            .iter()
            .try_fold(self.clone(), |parent, child| parent.derive_child(*child))
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey::from_secret_key(self.key)
    }

    fn from_hmac_output(output: &[u8]) -> Result<Self, DerivationError> {
        let key = SecretKey::from_slice(&output[..32]).map_err(|_| DerivationError::UnusableKey)?;
        let chain_code =
            output[32..64].try_into().expect("HMAC-SHA512 output splits into halves");
        Ok(Self { key, chain_code })
    }
}

impl Clone for ExtendedPrivateKey {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            chain_code: self.chain_code,
        }
    }
}

impl Drop for ExtendedPrivateKey {
    fn drop(&mut self) {
        self.key.non_secure_erase();
        self.chain_code.zeroize();
    }
}
