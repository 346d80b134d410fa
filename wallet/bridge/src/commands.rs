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

use logging::log;
use tokio::sync::mpsc;

use wallet_types::AccountIndex;

/// Toasts the presentation layer knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    UnlistSuccess,
    UnlistError,
}

/// Side effects the pipeline asks the presentation layer to perform.
///
/// The pipeline never touches UI or global state itself; it emits these and
/// moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Make the resolved account the active one before signing proceeds.
    SwitchAccount { account_index: AccountIndex },
    Toast(ToastKind),
    NavigateBack,
    /// A good signature's follow-up call failed; surface it without
    /// downgrading the signing success.
    FollowUpFailed(String),
}

/// Sending half for emitted UI commands.
#[derive(Debug, Clone)]
pub struct CommandSink(mpsc::UnboundedSender<UiCommand>);

impl CommandSink {
    pub fn new(sender: mpsc::UnboundedSender<UiCommand>) -> Self {
        Self(sender)
    }

    pub fn emit(&self, command: UiCommand) {
        if self.0.send(command).is_err() {
            log::warn!("UI command receiver dropped; command discarded");
        }
    }
}
