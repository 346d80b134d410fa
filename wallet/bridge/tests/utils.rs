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

//! Bridge pipeline testing utilities

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};
use tokio::sync::{mpsc, Semaphore};
use zeroize::Zeroizing;

use common::address::{encode_p2tr, encode_p2wpkh};
use common::NetworkKind;
use crypto::key::hdkd::ExtendedPrivateKey;
use crypto::key::MessageSignature;
use wallet::account::AddressKind;
use wallet::seed_vault::{SeedVault, SeedVaultError};
use wallet::signer::ledger_signer::{
    DeviceError, DeviceSignRequest, LedgerConnector, LedgerTransport,
};
use wallet::signer::software_signer::make_address_path;
use wallet_bridge::commands::{CommandSink, UiCommand};
use wallet_bridge::config::BridgeConfig;
use wallet_bridge::messages::InboundSigningMessage;
use wallet_bridge::orders::{CancelSellOrderRequest, OrdersApi, OrdersApiError};
use wallet_bridge::pipeline::SigningPipeline;
use wallet_bridge::types::{WalletSnapshot, WalletStateReader};
use wallet_types::{Account, HardwareWalletData, LedgerData};

pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub struct TestSeedVault;

#[async_trait]
impl SeedVault for TestSeedVault {
    async fn reveal_seed(&self) -> Result<Zeroizing<String>, SeedVaultError> {
        Ok(Zeroizing::new(TEST_MNEMONIC.to_string()))
    }
}

pub fn derived_address(kind: AddressKind, network: NetworkKind, account_index: u32) -> String {
    let seed = crypto::seed_from_mnemonic(TEST_MNEMONIC, "").unwrap();
    let master = ExtendedPrivateKey::new_master(seed.as_ref()).unwrap();
    let key = master
        .derive_path(&make_address_path(kind, network, account_index))
        .unwrap()
        .private_key();
    match kind {
        AddressKind::Payment => encode_p2wpkh(network, &key.public_key().pubkey_hash()).unwrap(),
        AddressKind::Ordinals => {
            encode_p2tr(network, &key.public_key().taproot_output_key().unwrap()).unwrap()
        }
    }
}

/// A software account whose addresses really derive from the test seed.
pub fn software_account(network: NetworkKind, account_index: u32) -> Account {
    Account {
        account_index,
        btc_address: derived_address(AddressKind::Payment, network, account_index),
        ordinals_address: derived_address(AddressKind::Ordinals, network, account_index),
        stx_address: format!("SPACCOUNT{account_index}"),
        ordinals_public_key: "03deadbeef".to_string(),
        hardware: None,
    }
}

pub fn hardware_account(device_account_index: u32) -> Account {
    Account {
        account_index: 100 + device_account_index,
        btc_address: format!("bc1qledger{device_account_index}"),
        ordinals_address: format!("bc1pledger{device_account_index}"),
        stx_address: format!("SPLEDGER{device_account_index}"),
        ordinals_public_key: "02ledger".to_string(),
        hardware: Some(HardwareWalletData::Ledger(LedgerData {
            device_account_index,
        })),
    }
}

pub struct TestWalletState(pub WalletSnapshot);

impl WalletStateReader for TestWalletState {
    fn snapshot(&self) -> WalletSnapshot {
        self.0.clone()
    }
}

pub fn snapshot(accounts: Vec<Account>, selected: Account, network: NetworkKind) -> WalletSnapshot {
    WalletSnapshot {
        accounts,
        selected,
        network,
    }
}

/// Orders API double: records submissions, optionally failing them.
pub struct MockOrdersApi {
    pub submissions: Mutex<Vec<CancelSellOrderRequest>>,
    pub fail: bool,
}

impl MockOrdersApi {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            submissions: Mutex::new(Vec::new()),
            fail,
        })
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl OrdersApi for MockOrdersApi {
    async fn submit_cancel_sell_order(
        &self,
        request: CancelSellOrderRequest,
    ) -> Result<(), OrdersApiError> {
        if self.fail {
            return Err(OrdersApiError::Request("backend unavailable".to_string()));
        }
        self.submissions.lock().unwrap().push(request);
        Ok(())
    }
}

/// Device double. Every connect produces a transport that resolves to the
/// configured outcome, optionally gated so tests can hold a confirmation
/// open.
pub struct MockConnector {
    outcome: Option<Result<MessageSignature, DeviceError>>,
    gate: Option<Arc<Semaphore>>,
    closed: Arc<AtomicUsize>,
    connects: Arc<AtomicUsize>,
    sign_calls: Arc<AtomicUsize>,
}

impl MockConnector {
    pub fn new(outcome: Option<Result<MessageSignature, DeviceError>>) -> Arc<Self> {
        Self::with_gate(outcome, None)
    }

    pub fn gated(
        outcome: Result<MessageSignature, DeviceError>,
        gate: Arc<Semaphore>,
    ) -> Arc<Self> {
        Self::with_gate(Some(outcome), Some(gate))
    }

    fn with_gate(
        outcome: Option<Result<MessageSignature, DeviceError>>,
        gate: Option<Arc<Semaphore>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            gate,
            closed: Arc::new(AtomicUsize::new(0)),
            connects: Arc::new(AtomicUsize::new(0)),
            sign_calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn sign_count(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }
}

pub struct MockTransport {
    outcome: Result<MessageSignature, DeviceError>,
    gate: Option<Arc<Semaphore>>,
    closed: Arc<AtomicUsize>,
    sign_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl LedgerTransport for MockTransport {
    async fn sign_message(
        &mut self,
        _request: &DeviceSignRequest,
    ) -> Result<MessageSignature, DeviceError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        self.outcome.clone()
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerConnector for MockConnector {
    type Transport = MockTransport;

    async fn connect(&self) -> Option<MockTransport> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone()?;
        Some(MockTransport {
            outcome,
            gate: self.gate.clone(),
            closed: self.closed.clone(),
            sign_calls: self.sign_calls.clone(),
        })
    }
}

pub fn device_signature() -> MessageSignature {
    MessageSignature::Schnorr([7u8; 64])
}

/// Everything a pipeline test needs in one bundle.
pub struct TestHarness {
    pub pipeline: Arc<SigningPipeline<TestSeedVault, MockConnector, MockOrdersApi>>,
    pub connector: Arc<MockConnector>,
    pub orders: Arc<MockOrdersApi>,
    /// The same sink the pipeline emits into; hand it to in-app channels so
    /// every command lands in `commands_rx`.
    pub commands: CommandSink,
    pub commands_rx: mpsc::UnboundedReceiver<UiCommand>,
}

pub fn make_pipeline(connector: Arc<MockConnector>, orders: Arc<MockOrdersApi>) -> TestHarness {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let commands = CommandSink::new(commands_tx);
    // No settling delay in tests; nothing here needs a device UI to come up.
    let config: BridgeConfig =
        serde_json::from_value(json!({"ledgerSettleDelayMs": 0})).unwrap();
    let pipeline = Arc::new(SigningPipeline::from_config(
        &config,
        Arc::new(TestSeedVault),
        connector.clone(),
        orders.clone(),
        commands.clone(),
    ));
    TestHarness {
        pipeline,
        connector,
        orders,
        commands,
        commands_rx,
    }
}

/// Build a legacy token the way dApp SDKs do.
pub fn make_request_token(payload: Value) -> String {
    let encode = |value: &Value| {
        base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(value).unwrap())
    };
    let header = json!({"typ": "JWT", "alg": "none"});
    let claims = json!({"payload": payload});
    format!("{}.{}.sig", encode(&header), encode(&claims))
}

pub fn legacy_message(request_id: &str, tab_id: &str, payload: Value) -> InboundSigningMessage {
    InboundSigningMessage {
        request_id: request_id.to_string(),
        tab_id: tab_id.to_string(),
        sign_message_request: Some(make_request_token(payload)),
        ..Default::default()
    }
}

/// Drain currently queued UI commands.
pub fn drain_commands(rx: &mut mpsc::UnboundedReceiver<UiCommand>) -> Vec<UiCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = rx.try_recv() {
        commands.push(command);
    }
    commands
}
