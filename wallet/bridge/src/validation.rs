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

use common::NetworkKind;
use wallet::account::{resolve_signing_account, ResolvedAccount};
use wallet_types::Account;

use crate::decoder::SigningRequest;

/// Read-only wallet state a request is validated against. Borrowed from a
/// [crate::types::WalletSnapshot]; validation never mutates anything.
#[derive(Debug, Clone, Copy)]
pub struct WalletContext<'a> {
    pub accounts: &'a [Account],
    pub selected: &'a Account,
    pub network: NetworkKind,
}

/// Terminal result of the validation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome<'a> {
    Valid(ResolvedAccount<'a>),
    NetworkMismatch,
    AddressMismatch,
}

/// Validate a decoded request against wallet state.
///
/// The network check comes first and short-circuits: signing on the wrong
/// network is the more severe misconfiguration, so it is reported even when
/// the address would have matched. Requests that name no address are active
/// account operations and resolve to the selected account.
pub fn validate_request<'a>(
    ctx: &WalletContext<'a>,
    request: &SigningRequest,
) -> ValidationOutcome<'a> {
    if let Some(declared) = request.network {
        if declared != ctx.network {
            return ValidationOutcome::NetworkMismatch;
        }
    }

    if request.address.is_empty() {
        return ValidationOutcome::Valid(ResolvedAccount {
            account: ctx.selected,
            matched: None,
        });
    }

    match resolve_signing_account(ctx.accounts, ctx.selected, &request.address) {
        Some(resolved) => ValidationOutcome::Valid(resolved),
        None => ValidationOutcome::AddressMismatch,
    }
}
