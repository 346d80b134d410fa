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


use wallet_types::Account;

/// Which of an account's addresses a signing target matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Segwit v0 payment address.
    Payment,
    /// Taproot ordinals address.
    Ordinals,
}

/// An account picked to service a signing request.
///
/// `matched` is `None` when the account was not found by address scan but by
/// the hardware fallback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAccount<'a> {
    pub account: &'a Account,
    pub matched: Option<AddressKind>,
}

/// Find the account that owns `address`.
///
/// Scans payment and ordinals addresses of every account. When the currently
/// selected account is hardware-backed, it wins over a missing scan match:
/// hardware devices expose addresses the wallet cannot enumerate ahead of
/// time, so the active device account is trusted to service the request.
pub fn resolve_signing_account<'a>(
    accounts: &'a [Account],
    selected: &'a Account,
    address: &str,
) -> Option<ResolvedAccount<'a>> {
    let scan_match = accounts.iter().find_map(|account| {
        if account.btc_address == address {
            Some(ResolvedAccount {
                account,
                matched: Some(AddressKind::Payment),
            })
        } else if account.ordinals_address == address {
            Some(ResolvedAccount {
                account,
                matched: Some(AddressKind::Ordinals),
            })
        } else {
            None
        }
    });

    match scan_match {
        Some(resolved) => Some(resolved),
        None if selected.is_hardware() => Some(ResolvedAccount {
            account: selected,
            matched: None,
        }),
        None => None,
    }
}
