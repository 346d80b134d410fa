// Copyright (c) 2025 RBB S.r.l
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

//! APDU-level plumbing for the wallet's Ledger app.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

use ledger_lib::{
    transport::{TcpDevice, TcpInfo, TcpTransport},
    Device, Exchange, Transport,
};
use ledger_proto::StatusCode;

use common::{MessageSigningProtocol, NetworkKind};
use crypto::key::MessageSignature;
use utils::ensure;

use super::{
    DeviceError, DeviceSignRequest, LedgerConnector, LedgerTransport, CAUSE_DATA_INVALID,
    SW_DEVICE_LOCKED,
};

const APDU_CLASS: u8 = 0xe0;
const INS_SIGN_MESSAGE: u8 = 0x10;
const P1_START: u8 = 0x00;
const P1_NEXT: u8 = 0x01;
const P2_LAST: u8 = 0x00;
const P2_MORE: u8 = 0x80;

/// Max payload bytes per APDU frame.
const MAX_CHUNK: usize = 250;
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(100);

/// Name the wallet app announces on the device.
pub const WALLET_APP_NAME: &str = "wallet-app";

/// Check that the response ends with the OK status code and return the rest
/// of the response back.
pub fn ok_response(mut resp: Vec<u8>) -> Result<Vec<u8>, DeviceError> {
    let (_, status_code) = resp
        .split_last_chunk::<2>()
        .ok_or_else(|| DeviceError::Other("truncated device response".to_string()))?;
    let status = u16::from_be_bytes(*status_code);

    match StatusCode::try_from(status) {
        Ok(StatusCode::Ok) => {
            resp.truncate(resp.len() - 2);
            Ok(resp)
        }
        _ => Err(device_error_from_status(status)),
    }
}

fn device_error_from_status(status: u16) -> DeviceError {
    match status {
        SW_DEVICE_LOCKED => DeviceError::Locked,
        status if status as u32 == CAUSE_DATA_INVALID => DeviceError::Cause(status as u32),
        status => DeviceError::Status(status),
    }
}

fn apdu_frame(ins: u8, p1: u8, p2: u8, data: &[u8]) -> Vec<u8> {
    debug_assert!(data.len() <= MAX_CHUNK);
    let mut buf = Vec::with_capacity(5 + data.len());
    buf.extend_from_slice(&[APDU_CLASS, ins, p1, p2, data.len() as u8]);
    buf.extend_from_slice(data);
    buf
}

/// Send a message to the Ledger and check the response status code is ok.
async fn exchange_message<L: Exchange + Send>(
    ledger: &mut L,
    msg_buf: &[u8],
) -> Result<Vec<u8>, DeviceError> {
    let resp = ledger
        .exchange(msg_buf, EXCHANGE_TIMEOUT)
        .await
        .map_err(|err| DeviceError::Other(err.to_string()))?;
    ok_response(resp)
}

/// Send a payload in chunks, as the max size of a message is one APDU frame.
/// The device answers on the final chunk.
async fn send_chunked<L: Exchange + Send>(
    ledger: &mut L,
    ins: u8,
    payload: &[u8],
) -> Result<Vec<u8>, DeviceError> {
    let chunks: Vec<&[u8]> = if payload.is_empty() {
        vec![&[]]
    } else {
        payload.chunks(MAX_CHUNK).collect()
    };
    let last = chunks.len() - 1;

    let mut resp = Vec::new();
    for (idx, chunk) in chunks.into_iter().enumerate() {
        let p1 = if idx == 0 { P1_START } else { P1_NEXT };
        let p2 = if idx == last { P2_LAST } else { P2_MORE };
        resp = exchange_message(ledger, &apdu_frame(ins, p1, p2, chunk)).await?;
    }
    Ok(resp)
}

fn encode_sign_request(request: &DeviceSignRequest) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + request.address.len() + request.message.len());
    buf.extend_from_slice(&request.account_index.to_be_bytes());
    buf.push(network_byte(request.network));
    buf.push(protocol_byte(request.protocol));
    buf.push(request.address.len() as u8);
    buf.extend_from_slice(request.address.as_bytes());
    buf.extend_from_slice(&(request.message.len() as u32).to_be_bytes());
    buf.extend_from_slice(request.message.as_bytes());
    buf
}

fn network_byte(network: NetworkKind) -> u8 {
    match network {
        NetworkKind::Mainnet => 0,
        NetworkKind::Testnet => 1,
        NetworkKind::Signet => 2,
        NetworkKind::Regtest => 3,
    }
}

fn protocol_byte(protocol: MessageSigningProtocol) -> u8 {
    match protocol {
        MessageSigningProtocol::Ecdsa => 0,
        MessageSigningProtocol::Bip322 => 1,
    }
}

fn decode_signature(
    protocol: MessageSigningProtocol,
    resp: &[u8],
) -> Result<MessageSignature, DeviceError> {
    match protocol {
        MessageSigningProtocol::Ecdsa => <[u8; 65]>::try_from(resp)
            .map(MessageSignature::RecoverableEcdsa)
            .map_err(|_| DeviceError::Other("unexpected signature length".to_string())),
        MessageSigningProtocol::Bip322 => <[u8; 64]>::try_from(resp)
            .map(MessageSignature::Schnorr)
            .map_err(|_| DeviceError::Other("unexpected signature length".to_string())),
    }
}

/// Check the app open on the device is ours and return its version.
pub async fn check_current_app<L: Device + Send>(ledger: &mut L) -> Result<String, DeviceError> {
    let info = ledger
        .app_info(EXCHANGE_TIMEOUT)
        .await
        .map_err(|err| DeviceError::Other(err.to_string()))?;
    ensure!(
        info.name == WALLET_APP_NAME,
        DeviceError::Other(format!("different app active: {}", info.name))
    );
    Ok(info.version)
}

/// [LedgerTransport] over any ledger-lib device connection.
pub struct LedgerMessageTransport<L> {
    device: L,
}

impl<L> LedgerMessageTransport<L> {
    pub fn new(device: L) -> Self {
        Self { device }
    }
}

#[async_trait]
impl<L: Exchange + Send> LedgerTransport for LedgerMessageTransport<L> {
    async fn sign_message(
        &mut self,
        request: &DeviceSignRequest,
    ) -> Result<MessageSignature, DeviceError> {
        let resp =
            send_chunked(&mut self.device, INS_SIGN_MESSAGE, &encode_sign_request(request)).await?;
        decode_signature(request.protocol, &resp)
    }

    async fn close(&mut self) {
        // ledger-lib tears the connection down when the device handle drops
    }
}

/// Connects to a Ledger emulator or TCP proxy.
pub struct TcpLedgerConnector {
    addr: SocketAddr,
}

impl TcpLedgerConnector {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

#[async_trait]
impl LedgerConnector for TcpLedgerConnector {
    type Transport = LedgerMessageTransport<TcpDevice>;

    async fn connect(&self) -> Option<Self::Transport> {
        let mut transport = TcpTransport::new().ok()?;
        let mut device = transport.connect(TcpInfo { addr: self.addr }).await.ok()?;
        check_current_app(&mut device).await.ok()?;
        Some(LedgerMessageTransport::new(device))
    }
}
