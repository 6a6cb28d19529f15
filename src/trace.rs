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

//! Observational tracing of call lifecycles.
//!
//! A [`RpcTrace`] sink, configured on the host builder, is invoked at the
//! four lifecycle points of a call: when a proxy emits it, when the
//! dispatcher hands it to a local handler, and when the proxy observes its
//! success or failure. The sink is purely observational — it has no
//! behavioral effect on the protocol — and sinks should return promptly,
//! as they are called from the hot paths.
//!
//! Independent of any configured sink, the crate emits `tracing` events at
//! the same points.

use crate::wire::CallId;

/// A call lifecycle event delivered to a [`RpcTrace`] sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcEvent<'a> {
    /// A proxy sent a call message.
    Emit {
        /// The invoked procedure.
        procedure: &'a str,
        /// The id allocated to the call.
        call_id: CallId,
    },
    /// The dispatcher is invoking a local handler for an inbound call.
    Handle {
        /// The matched procedure.
        procedure: &'a str,
        /// The id carried by the inbound call.
        call_id: CallId,
    },
    /// A proxy observed a successful result for a pending call.
    Success {
        /// The invoked procedure.
        procedure: &'a str,
        /// The id of the settled call.
        call_id: CallId,
    },
    /// A proxy observed a failed result for a pending call.
    Fail {
        /// The invoked procedure.
        procedure: &'a str,
        /// The id of the settled call.
        call_id: CallId,
    },
}

impl RpcEvent<'_> {
    /// Returns the procedure name the event concerns.
    #[must_use]
    pub const fn procedure(&self) -> &str {
        match self {
            Self::Emit { procedure, .. }
            | Self::Handle { procedure, .. }
            | Self::Success { procedure, .. }
            | Self::Fail { procedure, .. } => procedure,
        }
    }

    /// Returns the call id the event concerns.
    #[must_use]
    pub const fn call_id(&self) -> CallId {
        match self {
            Self::Emit { call_id, .. }
            | Self::Handle { call_id, .. }
            | Self::Success { call_id, .. }
            | Self::Fail { call_id, .. } => *call_id,
        }
    }
}

/// An observational sink for call lifecycle events.
///
/// # Example
///
/// ```rust
/// use msgrpc::{RpcEvent, RpcTrace};
///
/// struct StdoutTrace;
///
/// impl RpcTrace for StdoutTrace {
///     fn on_event(&self, event: RpcEvent<'_>) {
///         println!("{:?} {} {}", event, event.procedure(), event.call_id());
///     }
/// }
/// ```
pub trait RpcTrace: Send + Sync {
    /// Called once per lifecycle point of every traced call.
    fn on_event(&self, event: RpcEvent<'_>);
}
