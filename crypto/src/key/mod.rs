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

pub mod hdkd;

use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    schnorr,
    Keypair, Message, Scalar, Secp256k1, SecretKey, XOnlyPublicKey,
};

use crate::hash;

/// Signer errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Invalid private key data")]
    InvalidKey,
    #[error("Invalid signature data")]
    InvalidSignature,
}

/// A produced message signature, tagged by scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSignature {
    /// 65-byte recoverable ECDSA signature: header byte followed by `r || s`.
    RecoverableEcdsa([u8; 65]),
    /// 64-byte BIP340 Schnorr signature.
    Schnorr([u8; 64]),
}

impl MessageSignature {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MessageSignature::RecoverableEcdsa(bytes) => bytes,
            MessageSignature::Schnorr(bytes) => bytes,
        }
    }
}

#[derive(Clone)]
pub struct PrivateKey {
    key: SecretKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: secp256k1::PublicKey,
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, SignatureError> {
        let key = SecretKey::from_slice(bytes).map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self { key })
    }

    pub(crate) fn from_secret_key(key: SecretKey) -> Self {
        Self { key }
    }

    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey {
            key: self.key.public_key(&secp),
        }
    }

    /// Sign `message` in the classic Bitcoin signed-message format.
    ///
    /// The digest commits to the `"Bitcoin Signed Message:\n"` prefix; the
    /// header byte of the result allows public key recovery for a compressed
    /// key.
    pub fn sign_message_ecdsa(&self, message: &[u8]) -> MessageSignature {
        let secp = Secp256k1::new();
        let digest = signed_message_hash(message);
        let sig = secp.sign_ecdsa_recoverable(&Message::from_digest(digest), &self.key);
        let (rec_id, compact) = sig.serialize_compact();

        let mut bytes = [0u8; 65];
        bytes[0] = 31 + rec_id.to_i32() as u8;
        bytes[1..].copy_from_slice(&compact);
        MessageSignature::RecoverableEcdsa(bytes)
    }

    /// Sign the BIP322 digest of `message` with the taproot-tweaked key.
    pub fn sign_message_bip322(&self, message: &[u8]) -> Result<MessageSignature, SignatureError> {
        let secp = Secp256k1::new();
        let keypair = Keypair::from_secret_key(&secp, &self.key);
        let tweaked = tweak_keypair_for_taproot(&secp, &keypair)?;
        let digest = hash::bip0322_message_hash(message);
        let sig = secp.sign_schnorr_no_aux_rand(&Message::from_digest(digest), &tweaked);
        Ok(MessageSignature::Schnorr(sig.serialize()))
    }
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let key = secp256k1::PublicKey::from_slice(bytes).map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self { key })
    }

    /// Compressed SEC1 encoding.
    pub fn serialize(&self) -> [u8; 33] {
        self.key.serialize()
    }

    /// Witness program of the key's P2WPKH address.
    pub fn pubkey_hash(&self) -> [u8; 20] {
        hash::hash160(&self.serialize())
    }

    pub fn x_only(&self) -> [u8; 32] {
        self.key.x_only_public_key().0.serialize()
    }

    /// BIP341 key-path-only taproot output key for this internal key.
    pub fn taproot_output_key(&self) -> Result<[u8; 32], SignatureError> {
        let secp = Secp256k1::new();
        let (internal, _parity) = self.key.x_only_public_key();
        let tweak = taproot_tweak_scalar(&internal)?;
        let (output, _parity) =
            internal.add_tweak(&secp, &tweak).map_err(|_| SignatureError::InvalidKey)?;
        Ok(output.serialize())
    }
}

/// Check a recoverable ECDSA message signature against the expected key.
pub fn verify_message_ecdsa(
    signature: &MessageSignature,
    message: &[u8],
    expected: &PublicKey,
) -> bool {
    let MessageSignature::RecoverableEcdsa(bytes) = signature else {
        return false;
    };
    let Ok(rec_id) = RecoveryId::from_i32((bytes[0] as i32) - 31) else {
        return false;
    };
    let Ok(sig) = RecoverableSignature::from_compact(&bytes[1..], rec_id) else {
        return false;
    };

    let secp = Secp256k1::new();
    let digest = Message::from_digest(signed_message_hash(message));
    secp.recover_ecdsa(&digest, &sig).is_ok_and(|recovered| recovered == expected.key)
}

/// Check a BIP322 Schnorr message signature against a taproot output key.
pub fn verify_message_bip322(
    signature: &MessageSignature,
    message: &[u8],
    taproot_output_key: &[u8; 32],
) -> bool {
    let MessageSignature::Schnorr(bytes) = signature else {
        return false;
    };
    let Ok(sig) = schnorr::Signature::from_slice(bytes) else {
        return false;
    };
    let Ok(output_key) = XOnlyPublicKey::from_slice(taproot_output_key) else {
        return false;
    };

    let secp = Secp256k1::new();
    let digest = Message::from_digest(hash::bip0322_message_hash(message));
    secp.verify_schnorr(&sig, &digest, &output_key).is_ok()
}

fn tweak_keypair_for_taproot(
    secp: &Secp256k1<secp256k1::All>,
    keypair: &Keypair,
) -> Result<Keypair, SignatureError> {
    let (internal, _parity) = keypair.x_only_public_key();
    let tweak = taproot_tweak_scalar(&internal)?;
    keypair.add_xonly_tweak(secp, &tweak).map_err(|_| SignatureError::InvalidKey)
}

fn taproot_tweak_scalar(internal: &XOnlyPublicKey) -> Result<Scalar, SignatureError> {
    let tweak = hash::tagged_hash("TapTweak", &internal.serialize());
    Scalar::from_be_bytes(tweak).map_err(|_| SignatureError::InvalidKey)
}

fn signed_message_hash(message: &[u8]) -> [u8; 32] {
    const PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

    let mut data = Vec::with_capacity(PREFIX.len() + 9 + message.len());
    data.extend_from_slice(PREFIX);
    push_compact_size(&mut data, message.len() as u64);
    data.extend_from_slice(message);
    hash::sha256d(&data)
}

fn push_compact_size(buf: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => buf.push(value as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
}
