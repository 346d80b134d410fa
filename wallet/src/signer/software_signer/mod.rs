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


use common::address::{encode_p2tr, encode_p2wpkh};
use common::{MessageSigningProtocol, NetworkKind};
use crypto::key::hdkd::{ChildNumber, DerivationPath, ExtendedPrivateKey};
use crypto::key::PrivateKey;
use utils::ensure;
use wallet_types::Account;

use crate::account::AddressKind;
use crate::seed_vault::SeedVault;
use crate::signer::{SignedMessage, SignerError, SignerResult};

/// Purpose level of payment address derivation (BIP84, P2WPKH).
const PAYMENT_PURPOSE: u32 = 84;
/// Purpose level of ordinals address derivation (BIP86, P2TR).
const ORDINALS_PURPOSE: u32 = 86;

/// Signs messages with keys derived from the wallet seed.
pub struct SoftwareSigner<'a, V: SeedVault + ?Sized> {
    vault: &'a V,
    network: NetworkKind,
}

impl<'a, V: SeedVault + ?Sized> SoftwareSigner<'a, V> {
    pub fn new(vault: &'a V, network: NetworkKind) -> Self {
        Self { vault, network }
    }

    /// Sign `message` for `address`, which must be one of `account`'s own
    /// addresses.
    ///
    /// The seed phrase is revealed, stretched into the derived key and
    /// dropped before this function returns; nothing secret outlives the
    /// call.
    pub async fn sign_message(
        &self,
        account: &Account,
        address: &str,
        message: &str,
        protocol: MessageSigningProtocol,
    ) -> SignerResult<SignedMessage> {
        let kind = if address == account.btc_address {
            AddressKind::Payment
        } else if address == account.ordinals_address {
            AddressKind::Ordinals
        } else {
            return Err(SignerError::AddressNotOwned(address.to_string()));
        };

        let key = {
            let seed_phrase = self.vault.reveal_seed().await?;
            let seed = crypto::seed_from_mnemonic(&seed_phrase, "")?;
            let master = ExtendedPrivateKey::new_master(seed.as_ref())?;
            let path = make_address_path(kind, self.network, account.account_index);
            master.derive_path(&path)?.private_key()
        };

        // The derived key must map back to the address we claim to sign for.
        ensure!(
            self.encode_address(kind, &key)? == address,
            SignerError::AddressNotOwned(address.to_string())
        );

        let signature = match protocol {
            MessageSigningProtocol::Ecdsa => key.sign_message_ecdsa(message.as_bytes()),
            MessageSigningProtocol::Bip322 => key.sign_message_bip322(message.as_bytes())?,
        };

        Ok(SignedMessage {
            address: address.to_string(),
            signature,
        })
    }

    fn encode_address(&self, kind: AddressKind, key: &PrivateKey) -> SignerResult<String> {
        let address = match kind {
            AddressKind::Payment => {
                encode_p2wpkh(self.network, &key.public_key().pubkey_hash())?
            }
            AddressKind::Ordinals => {
                encode_p2tr(self.network, &key.public_key().taproot_output_key()?)?
            }
        };
        Ok(address)
    }
}

/// Derivation path of the first external address of `account_index` for the
/// given address family.
pub fn make_address_path(
    kind: AddressKind,
    network: NetworkKind,
    account_index: u32,
) -> DerivationPath {
    let purpose = match kind {
        AddressKind::Payment => PAYMENT_PURPOSE,
        AddressKind::Ordinals => ORDINALS_PURPOSE,
    };
    DerivationPath::new(vec![
        ChildNumber::hardened(purpose),
        ChildNumber::hardened(network.bip44_coin_type()),
        ChildNumber::hardened(account_index),
        ChildNumber::normal(0),
        ChildNumber::normal(0),
    ])
}
