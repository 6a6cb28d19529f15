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

//! In-memory transport implementation for testing.
//!
//! This module provides a linked transport pair backed by Tokio broadcast
//! channels. It is primarily useful for testing and demos without real
//! message-channel I/O, and it reproduces the properties the protocol is
//! designed for: fan-out delivery to every listener and best-effort
//! semantics (messages sent while nobody listens are dropped).

use super::{MessageStream, Transport, TransportError};
use serde_json::Value;
use tokio::sync::broadcast;

/// Default buffer size for memory transport channels.
const DEFAULT_BUFFER_SIZE: usize = 64;

/// In-memory message transport.
///
/// [`MemoryTransport::pair`] creates two linked halves: a message sent on
/// one half is observed by every subscriber of the other, in both
/// directions. This mirrors a pair of windows posting messages to each
/// other, without any I/O.
///
/// Cloning a half yields another handle to the same side of the link —
/// useful for injecting test traffic alongside a running host.
///
/// # Examples
///
/// ```rust
/// use msgrpc::{MemoryTransport, Transport};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (alpha, beta) = MemoryTransport::pair_default();
///
/// let mut inbound = beta.subscribe();
/// alpha.send(json!(["ping"])).unwrap();
///
/// assert_eq!(inbound.recv().await, Some(json!(["ping"])));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    outbound: broadcast::Sender<Value>,
    inbound: broadcast::Sender<Value>,
}

impl MemoryTransport {
    /// Creates a linked pair of memory transports.
    ///
    /// `buffer_size` is the per-direction channel capacity; a subscriber
    /// that falls more than `buffer_size` messages behind loses the
    /// overflow, which the protocol treats as ordinary channel loss.
    #[must_use]
    pub fn pair(buffer_size: usize) -> (Self, Self) {
        let (alpha_to_beta, _) = broadcast::channel(buffer_size);
        let (beta_to_alpha, _) = broadcast::channel(buffer_size);

        let alpha = Self {
            outbound: alpha_to_beta.clone(),
            inbound: beta_to_alpha.clone(),
        };
        let beta = Self {
            outbound: beta_to_alpha,
            inbound: alpha_to_beta,
        };

        (alpha, beta)
    }

    /// Creates a linked pair with the default buffer size.
    #[must_use]
    pub fn pair_default() -> (Self, Self) {
        Self::pair(DEFAULT_BUFFER_SIZE)
    }
}

impl Transport for MemoryTransport {
    fn send(&self, message: Value) -> Result<(), TransportError> {
        // A send with no live subscribers is dropped, not failed: the
        // channel contract is best-effort delivery to current listeners.
        let _ = self.outbound.send(message);
        Ok(())
    }

    fn subscribe(&self) -> MessageStream {
        MessageStream::from(self.inbound.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_transport_basic() {
        let (alpha, beta) = MemoryTransport::pair_default();

        let mut inbound = beta.subscribe();
        alpha.send(json!({"hello": "world"})).unwrap();

        assert_eq!(inbound.recv().await, Some(json!({"hello": "world"})));
    }

    #[tokio::test]
    async fn test_memory_transport_bidirectional() {
        let (alpha, beta) = MemoryTransport::pair_default();

        let mut at_alpha = alpha.subscribe();
        let mut at_beta = beta.subscribe();

        alpha.send(json!("from alpha")).unwrap();
        beta.send(json!("from beta")).unwrap();

        assert_eq!(at_beta.recv().await, Some(json!("from alpha")));
        assert_eq!(at_alpha.recv().await, Some(json!("from beta")));
    }

    #[tokio::test]
    async fn test_memory_transport_fan_out() {
        let (alpha, beta) = MemoryTransport::pair_default();

        let mut first = beta.subscribe();
        let mut second = beta.subscribe();

        alpha.send(json!(1)).unwrap();

        // Every listener observes every message.
        assert_eq!(first.recv().await, Some(json!(1)));
        assert_eq!(second.recv().await, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_memory_transport_own_traffic_not_echoed() {
        let (alpha, beta) = MemoryTransport::pair_default();

        let mut at_alpha = alpha.subscribe();
        let mut at_beta = beta.subscribe();

        alpha.send(json!("outbound")).unwrap();
        assert_eq!(at_beta.recv().await, Some(json!("outbound")));

        // Alpha's own subscriber sees only what beta sends.
        beta.send(json!("reply")).unwrap();
        assert_eq!(at_alpha.recv().await, Some(json!("reply")));
    }

    #[tokio::test]
    async fn test_memory_transport_send_without_listeners() {
        let (alpha, _beta) = MemoryTransport::pair_default();

        // No subscriber on the far side: the message is dropped, the send
        // still succeeds.
        assert!(alpha.send(json!("into the void")).is_ok());
    }

    #[tokio::test]
    async fn test_memory_transport_ordering_within_direction() {
        let (alpha, beta) = MemoryTransport::pair_default();

        let mut inbound = beta.subscribe();
        alpha.send(json!(1)).unwrap();
        alpha.send(json!(2)).unwrap();
        alpha.send(json!(3)).unwrap();

        assert_eq!(inbound.recv().await, Some(json!(1)));
        assert_eq!(inbound.recv().await, Some(json!(2)));
        assert_eq!(inbound.recv().await, Some(json!(3)));
    }

    #[tokio::test]
    async fn test_memory_transport_clone_shares_side() {
        let (alpha, beta) = MemoryTransport::pair_default();
        let alpha_handle = alpha.clone();

        let mut inbound = beta.subscribe();
        alpha_handle.send(json!("via clone")).unwrap();

        assert_eq!(inbound.recv().await, Some(json!("via clone")));
    }
}
