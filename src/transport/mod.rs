//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The transport seam the protocol rides on.
//!
//! The protocol never touches a network directly. The embedder supplies a
//! [`Transport`]: a way to send one structured message to the peer, and a
//! way to observe every message arriving from the peer. Anything with those
//! two properties — cross-window messaging, worker channels, a pub/sub bus,
//! a pipe with framing — can carry the protocol.
//!
//! The contract is deliberately weak: delivery is best-effort, ordering is
//! not guaranteed, and the channel may be shared with unrelated traffic.
//! The layers above are built to tolerate all three.
//!
//! An in-memory implementation ([`MemoryTransport`]) is bundled for tests,
//! demos, and benchmarking without real I/O.

mod error;
mod memory;

pub use error::TransportError;
pub use memory::MemoryTransport;

use serde_json::Value;
use tokio::sync::broadcast;

/// A duplex, best-effort channel for discrete structured messages.
///
/// This is the contract of the underlying primitive, not of this crate: the
/// only promise a `Transport` makes is that a sent message *may* eventually
/// be observed by any current subscriber on the other side. No delivery
/// guarantee, no ordering guarantee, no exclusivity — foreign traffic on
/// the same channel is expected and tolerated upstream.
///
/// # Listener semantics
///
/// Every live [`MessageStream`] returned by [`subscribe`](Self::subscribe)
/// must observe every subsequently delivered inbound message (fan-out, not
/// competition). Dropping the stream deregisters the listener. If the
/// underlying channel wraps messages in event objects, unwrapping them to
/// the raw structured value is the implementor's concern inside
/// `subscribe`.
///
/// # Implementing
///
/// ```rust
/// use msgrpc::{MessageStream, Transport, TransportError};
/// use serde_json::Value;
/// use tokio::sync::broadcast;
///
/// /// Loops every sent message back to local subscribers.
/// struct Loopback {
///     bus: broadcast::Sender<Value>,
/// }
///
/// impl Transport for Loopback {
///     fn send(&self, message: Value) -> Result<(), TransportError> {
///         // Best-effort: nobody listening means the message is dropped.
///         let _ = self.bus.send(message);
///         Ok(())
///     }
///
///     fn subscribe(&self) -> MessageStream {
///         MessageStream::from(self.bus.subscribe())
///     }
/// }
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Sends one message toward the peer.
    ///
    /// Sending is fire-and-forget: success means the transport accepted
    /// the message, not that the peer will observe it.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] only when the transport itself cannot
    /// accept the message (closed, resource failure). Such errors are not
    /// caught by the protocol core — they propagate to whoever initiated
    /// the send.
    fn send(&self, message: Value) -> Result<(), TransportError>;

    /// Registers a listener for inbound messages.
    ///
    /// The returned stream observes every message delivered from the peer
    /// after this call. Dropping the stream removes the listener.
    fn subscribe(&self) -> MessageStream;
}

/// A registered inbound-message listener.
///
/// Obtained from [`Transport::subscribe`]. The stream yields every message
/// the peer delivers for as long as it is held; dropping it deregisters
/// the listener.
#[derive(Debug)]
pub struct MessageStream {
    inner: broadcast::Receiver<Value>,
}

impl MessageStream {
    /// Receives the next inbound message.
    ///
    /// Returns `None` once the transport is closed and no further messages
    /// can arrive. A slow consumer that misses messages under load skips
    /// them and keeps going — dropped traffic is indistinguishable from
    /// channel loss, which the protocol already tolerates.
    pub async fn recv(&mut self) -> Option<Value> {
        loop {
            match self.inner.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "message stream lagged; missed inbound traffic");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl From<broadcast::Receiver<Value>> for MessageStream {
    fn from(inner: broadcast::Receiver<Value>) -> Self {
        Self { inner }
    }
}
