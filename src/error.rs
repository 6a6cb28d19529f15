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

//! Error types for remote procedure invocations.

use crate::transport::TransportError;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Errors observed by the caller of a remote procedure.
///
/// Every failure of a call resolves locally into exactly one of these
/// variants; nothing is retried automatically. Malformed inbound traffic is
/// never surfaced as an error — it is dropped silently at both ends.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcError {
    /// The remote handler failed.
    ///
    /// The payload is the marshaled failure value as it crossed the
    /// channel: the failure's `message` string, the original string if the
    /// handler failed with one, or `Null` when the failure carried nothing
    /// transportable. Rich error structure (stacks, subclass identity) does
    /// not survive marshaling.
    Rejected {
        /// The procedure that was invoked.
        procedure: String,
        /// The marshaled failure value received from the peer.
        payload: Value,
    },

    /// No matching result arrived within the configured window.
    ///
    /// The channel offers no delivery guarantee, so this covers both lost
    /// messages and procedures the peer never defined — the protocol does
    /// not distinguish the two.
    Timeout {
        /// The procedure that was invoked.
        procedure: String,
        /// The window that elapsed without a matching result.
        timeout: Duration,
    },

    /// The transport failed to accept the outbound call message.
    ///
    /// Send failures are not caught by the correlation engine; they
    /// propagate directly to the invoker.
    Transport(TransportError),

    /// The correlation plumbing failed outside the wire protocol.
    ///
    /// Covers a pending call dropped before completion and typed-stub
    /// argument/result conversion failures.
    Internal {
        /// A description of the internal failure.
        message: String,
    },
}

impl RpcError {
    /// Returns `true` if this is a remote handler failure.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns `true` if this error indicates a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a transport send failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the procedure name associated with this error, if any.
    #[must_use]
    pub fn procedure(&self) -> Option<&str> {
        match self {
            Self::Rejected { procedure, .. } | Self::Timeout { procedure, .. } => Some(procedure),
            Self::Transport(_) | Self::Internal { .. } => None,
        }
    }

    /// Returns the marshaled rejection payload, if this is a rejection.
    #[must_use]
    pub const fn rejection_payload(&self) -> Option<&Value> {
        match self {
            Self::Rejected { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { procedure, payload } => {
                write!(f, "procedure '{}' failed: {}", procedure, payload)
            }
            Self::Timeout { procedure, timeout } => {
                write!(
                    f,
                    "procedure '{}' timed out after {}ms",
                    procedure,
                    timeout.as_millis()
                )
            }
            Self::Transport(error) => write!(f, "transport error: {}", error),
            Self::Internal { message } => write!(f, "internal correlation error: {}", message),
        }
    }
}

impl std::error::Error for RpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }
}

impl From<TransportError> for RpcError {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}
