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
use wallet::signer::SignedMessage;
use wallet::signer::ledger_signer::HardwareFailure;
use wallet_types::Account;

use crate::validation::WalletContext;

/// Classified terminal failure of a signing request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Neither request encoding could be decoded. Not retryable.
    #[error("Malformed signing request: {0}")]
    MalformedRequest(String),
    /// The method's param schema was violated; carries the offending field.
    #[error("Invalid params: field '{0}'")]
    InvalidParams(String),
    /// The request names a network other than the active one.
    #[error("Request network does not match the active network")]
    NetworkMismatch,
    /// No account owns the requested address.
    #[error("No account owns the requested address")]
    AddressMismatch,
    /// The signing device could not be reached, is locked or busy.
    #[error("Could not connect to the signing device")]
    ConnectionFailed,
    /// The device reports the request can no longer be signed.
    #[error("The request is no longer valid for signing")]
    TransactionInvalid,
    /// The user declined, or the device failed in a way we treat as such.
    #[error("The signing request was rejected")]
    UserRejected,
    /// The software signing path failed cryptographically.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl RequestError {
    /// Stable identifier callers can match on.
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::MalformedRequest(_) => "MALFORMED_REQUEST",
            RequestError::InvalidParams(_) => "INVALID_PARAMS",
            RequestError::NetworkMismatch => "NETWORK_MISMATCH",
            RequestError::AddressMismatch => "ADDRESS_MISMATCH",
            RequestError::ConnectionFailed => "CONNECTION_FAILED",
            RequestError::TransactionInvalid => "TRANSACTION_INVALID",
            RequestError::UserRejected => "USER_REJECTED",
            RequestError::SigningFailed(_) => "SIGNING_FAILED",
        }
    }
}

impl From<HardwareFailure> for RequestError {
    fn from(failure: HardwareFailure) -> Self {
        match failure {
            HardwareFailure::ConnectionFailed => RequestError::ConnectionFailed,
            HardwareFailure::TransactionInvalid => RequestError::TransactionInvalid,
            HardwareFailure::UserRejected => RequestError::UserRejected,
        }
    }
}

/// The post-signing dependent call failed. The signature itself stays valid;
/// this is reported alongside the success, never instead of it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Follow-up submission failed: {0}")]
pub struct FollowUpFailed(pub String);

/// Terminal outcome of one signing request. Produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Signed {
        result: SignedMessage,
        /// Set when the dependent follow-up call failed after a good
        /// signature.
        follow_up: Option<FollowUpFailed>,
    },
    Rejected(RequestError),
}

/// Owned snapshot of the wallet-wide read-only state a request is validated
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub accounts: Vec<Account>,
    pub selected: Account,
    pub network: NetworkKind,
}

impl WalletSnapshot {
    pub fn context(&self) -> WalletContext<'_> {
        WalletContext {
            accounts: &self.accounts,
            selected: &self.selected,
            network: self.network,
        }
    }
}

/// Read-only view of wallet state, snapshotted per request.
pub trait WalletStateReader: Send + Sync {
    fn snapshot(&self) -> WalletSnapshot;
}
