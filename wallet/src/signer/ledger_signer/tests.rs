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

use super::session::{LedgerSession, SessionStep};
use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{MessageSigningProtocol, NetworkKind};

fn sign_request() -> DeviceSignRequest {
    DeviceSignRequest {
        account_index: 0,
        address: "bc1paddress".to_string(),
        network: NetworkKind::Mainnet,
        message: "hello".to_string(),
        protocol: MessageSigningProtocol::Bip322,
    }
}

struct MockTransport {
    outcome: Result<MessageSignature, DeviceError>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl LedgerTransport for MockTransport {
    async fn sign_message(
        &mut self,
        _request: &DeviceSignRequest,
    ) -> Result<MessageSignature, DeviceError> {
        self.outcome.clone()
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Connector whose transports always resolve to the configured outcome.
/// `None` means no device is present at all.
struct MockConnector {
    outcome: Option<Result<MessageSignature, DeviceError>>,
    closed: Arc<AtomicUsize>,
    connects: Arc<AtomicUsize>,
}

impl MockConnector {
    fn new(outcome: Option<Result<MessageSignature, DeviceError>>) -> Self {
        Self {
            outcome,
            closed: Arc::new(AtomicUsize::new(0)),
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerConnector for MockConnector {
    type Transport = MockTransport;

    async fn connect(&self) -> Option<MockTransport> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map(|outcome| MockTransport {
            outcome,
            closed: self.closed.clone(),
        })
    }
}

fn signature() -> MessageSignature {
    MessageSignature::Schnorr([1u8; 64])
}

fn session_with(
    outcome: Option<Result<MessageSignature, DeviceError>>,
) -> (Arc<MockConnector>, LedgerSession<Arc<MockConnector>>) {
    let connector = Arc::new(MockConnector::new(outcome));
    let session =
        LedgerSession::with_settle_delay(connector.clone(), Duration::from_millis(1500));
    (connector, session)
}

#[tokio::test(start_paused = true)]
async fn successful_confirmation_walks_all_steps() {
    let (connector, mut session) = session_with(Some(Ok(signature())));

    assert_eq!(session.step(), SessionStep::Idle);

    session.connect().await.unwrap();
    assert_eq!(session.step(), SessionStep::Connected);

    let produced = session.confirm_sign(&sign_request()).await.unwrap();
    assert_eq!(session.step(), SessionStep::Succeeded);
    assert!(!produced.as_bytes().is_empty());
    assert_eq!(connector.closed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn missing_device_fails_connection() {
    let (connector, mut session) = session_with(None);

    assert_eq!(session.connect().await, Err(HardwareFailure::ConnectionFailed));
    assert_eq!(session.step(), SessionStep::Failed(HardwareFailure::ConnectionFailed));
    assert_eq!(connector.closed_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn invalid_request_cause_is_classified() {
    let (connector, mut session) = session_with(Some(Err(DeviceError::Cause(27012))));

    session.connect().await.unwrap();
    assert_eq!(
        session.confirm_sign(&sign_request()).await,
        Err(HardwareFailure::TransactionInvalid)
    );
    assert_eq!(
        session.step(),
        SessionStep::Failed(HardwareFailure::TransactionInvalid)
    );
    assert_eq!(connector.closed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn locked_device_is_a_connection_failure() {
    let (_connector, mut session) = session_with(Some(Err(DeviceError::Locked)));

    session.connect().await.unwrap();
    assert_eq!(
        session.confirm_sign(&sign_request()).await,
        Err(HardwareFailure::ConnectionFailed)
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_device_error_is_a_rejection() {
    let (connector, mut session) = session_with(Some(Err(DeviceError::Status(0x6985))));

    session.connect().await.unwrap();
    assert_eq!(
        session.confirm_sign(&sign_request()).await,
        Err(HardwareFailure::UserRejected)
    );
    assert_eq!(connector.closed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn confirmation_requires_a_connection() {
    let (_connector, mut session) = session_with(Some(Ok(signature())));

    assert_eq!(
        session.confirm_sign(&sign_request()).await,
        Err(HardwareFailure::ConnectionFailed)
    );
    assert_eq!(
        session.step(),
        SessionStep::Failed(HardwareFailure::ConnectionFailed)
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_releases_transport_and_is_idempotent() {
    let (connector, mut session) = session_with(Some(Ok(signature())));

    session.connect().await.unwrap();
    session.cancel().await;
    assert_eq!(session.step(), SessionStep::Idle);
    assert_eq!(connector.closed_count(), 1);

    // Repeated cancellation changes nothing, including from a fresh Idle.
    session.cancel().await;
    assert_eq!(session.step(), SessionStep::Idle);
    assert_eq!(connector.closed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_after_terminal_step_is_a_noop() {
    let (_connector, mut session) = session_with(Some(Ok(signature())));

    session.connect().await.unwrap();
    session.confirm_sign(&sign_request()).await.unwrap();
    session.cancel().await;
    assert_eq!(session.step(), SessionStep::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn retry_resets_to_idle_and_reconnects() {
    let (connector, mut session) = session_with(Some(Err(DeviceError::Status(0x6985))));

    session.connect().await.unwrap();
    let _ = session.confirm_sign(&sign_request()).await;
    assert_eq!(session.step(), SessionStep::Failed(HardwareFailure::UserRejected));

    session.reset_for_retry().await;
    assert_eq!(session.step(), SessionStep::Idle);

    session.connect().await.unwrap();
    assert_eq!(session.step(), SessionStep::Connected);
    assert_eq!(connector.connect_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn reconnect_tears_down_the_previous_transport() {
    let (connector, mut session) = session_with(Some(Ok(signature())));

    session.connect().await.unwrap();
    session.connect().await.unwrap();

    assert_eq!(connector.connect_count(), 2);
    assert_eq!(connector.closed_count(), 1);
    assert_eq!(session.step(), SessionStep::Connected);
}
