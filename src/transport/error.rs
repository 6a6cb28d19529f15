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

//! Error types for the transport layer.

use thiserror::Error;

/// Errors raised by a [`Transport`](super::Transport) when it cannot
/// accept an outbound message.
///
/// Inbound problems never surface here: a transport that observes
/// malformed traffic simply delivers it, and the protocol layers above
/// drop what they cannot decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport is closed and cannot carry further messages.
    #[error("transport is closed")]
    Closed,

    /// The transport failed to accept the message.
    #[error("transport send failed: {reason}")]
    Send {
        /// A description of the send failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TransportError::Closed.to_string(), "transport is closed");
        let send = TransportError::Send {
            reason: "buffer detached".to_string(),
        };
        assert!(send.to_string().contains("buffer detached"));
    }
}
