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

//! The host: inbound dispatch and proxy minting.

use super::procedures::Procedures;
use crate::marshal::marshal_failure;
use crate::proxy::RemoteProxy;
use crate::trace::{RpcEvent, RpcTrace};
use crate::transport::{MessageStream, Transport};
use crate::wire::{CallMessage, ResultMessage};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Window a call waits for its result before failing, unless configured.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(5000);

/// One side of the channel: hosts local procedures, mints remote proxies.
///
/// Built via [`Host::builder`] from an explicitly injected transport. When
/// the procedure set is non-empty the host registers one long-lived
/// inbound listener at construction and answers well-shaped call messages
/// with correlated results; a host with no procedures registers nothing
/// and only mints proxies.
///
/// [`clean_up`](Self::clean_up) removes exactly that long-lived listener.
/// It does not touch in-flight outbound calls — proxies are independent
/// and run their own timers. Dropping the host cleans up implicitly.
///
/// # Example
///
/// ```rust
/// use msgrpc::{Host, MemoryTransport, Procedures};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), msgrpc::RpcError> {
/// let (alpha, beta) = MemoryTransport::pair_default();
///
/// // Each side both hosts and calls.
/// let left = Host::builder(Arc::new(alpha))
///     .procedures(Procedures::new().define("whoami", |_| async move { Ok(json!("left")) }))
///     .build();
/// let right = Host::builder(Arc::new(beta))
///     .procedures(Procedures::new().define("whoami", |_| async move { Ok(json!("right")) }))
///     .build();
///
/// let ask_left = right.create_proxy();
/// let ask_right = left.create_proxy();
///
/// assert_eq!(ask_left.invoke("whoami", vec![]).await?, json!("left"));
/// assert_eq!(ask_right.invoke("whoami", vec![]).await?, json!("right"));
/// # Ok(())
/// # }
/// ```
pub struct Host {
    transport: Arc<dyn Transport>,
    procedures: Arc<Procedures>,
    timeout: Duration,
    trace: Option<Arc<dyn RpcTrace>>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl Host {
    /// Starts building a host over the given transport.
    ///
    /// The transport is required and explicit; there is no ambient
    /// default.
    #[must_use]
    pub fn builder(transport: Arc<dyn Transport>) -> HostBuilder {
        HostBuilder {
            transport,
            procedures: Procedures::new(),
            timeout: DEFAULT_CALL_TIMEOUT,
            trace: None,
        }
    }

    /// Mints a fresh call surface onto the peer's procedures.
    ///
    /// Every proxy is independent: its own call-id counter starting at 0,
    /// its own pending table, its own inbound listener. Proxies outlive
    /// [`clean_up`](Self::clean_up) and may outlive the host.
    #[must_use]
    pub fn create_proxy(&self) -> RemoteProxy {
        RemoteProxy::new(self.transport.clone(), self.timeout, self.trace.clone())
    }

    /// Invokes a locally defined procedure without touching the channel.
    ///
    /// This is the local re-exposure of the procedure set: the handler
    /// runs directly and its outcome is returned unmarshaled. Returns
    /// `None` if no procedure is defined under `name`.
    pub async fn invoke_local(
        &self,
        name: &str,
        args: Vec<Value>,
    ) -> Option<Result<Value, Value>> {
        let handler = self.procedures.get(name)?;
        Some(handler(args).await)
    }

    /// Returns the procedures this host exposes.
    #[must_use]
    pub fn procedures(&self) -> &Procedures {
        &self.procedures
    }

    /// Returns the timeout applied to calls made through this host's
    /// proxies.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Tears down the inbound dispatch listener.
    ///
    /// After this returns, the host no longer responds to any call
    /// message for any of its procedures. Idempotent; a host built with no
    /// procedures has nothing to tear down. Outbound calls already in
    /// flight on minted proxies are unaffected.
    pub fn clean_up(&self) {
        let mut slot = self
            .dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.abort();
            tracing::debug!("host dispatch listener removed");
        }
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.clean_up();
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("procedures", &self.procedures)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Host`].
///
/// Obtained from [`Host::builder`]; every knob beyond the transport is
/// optional.
pub struct HostBuilder {
    transport: Arc<dyn Transport>,
    procedures: Procedures,
    timeout: Duration,
    trace: Option<Arc<dyn RpcTrace>>,
}

impl HostBuilder {
    /// Sets the procedures this host exposes to its peer.
    ///
    /// Without this the host exposes nothing and handles no inbound
    /// traffic.
    #[must_use]
    pub fn procedures(mut self, procedures: Procedures) -> Self {
        self.procedures = procedures;
        self
    }

    /// Sets the window each call waits for its result.
    ///
    /// Defaults to [`DEFAULT_CALL_TIMEOUT`] (5000 ms). Applies to proxies
    /// minted by the built host.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Installs an observational trace sink.
    ///
    /// The sink sees emit/handle/success/fail lifecycle events for calls
    /// flowing through this host and its proxies. Purely observational.
    #[must_use]
    pub fn trace(mut self, trace: Arc<dyn RpcTrace>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Builds the host, registering the inbound dispatch listener if any
    /// procedures are defined.
    ///
    /// Must be called within a Tokio runtime.
    #[must_use]
    pub fn build(self) -> Host {
        let procedures = Arc::new(self.procedures);
        let dispatcher = if procedures.is_empty() {
            None
        } else {
            // Subscribe before spawning so no inbound call slips past.
            let inbound = self.transport.subscribe();
            Some(tokio::spawn(dispatch_calls(
                inbound,
                self.transport.clone(),
                procedures.clone(),
                self.trace.clone(),
            )))
        };
        Host {
            transport: self.transport,
            procedures,
            timeout: self.timeout,
            trace: self.trace,
            dispatcher: Mutex::new(dispatcher),
        }
    }
}

impl fmt::Debug for HostBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBuilder")
            .field("procedures", &self.procedures)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Answers well-shaped inbound call messages with correlated results.
async fn dispatch_calls(
    mut inbound: MessageStream,
    transport: Arc<dyn Transport>,
    procedures: Arc<Procedures>,
    trace: Option<Arc<dyn RpcTrace>>,
) {
    while let Some(raw) = inbound.recv().await {
        let Some(call) = CallMessage::decode(&raw) else {
            // Unrelated or malformed traffic; the channel is shared.
            continue;
        };
        let Some(handler) = procedures.get(&call.procedure) else {
            // Deliberately no response: the caller cannot distinguish an
            // undefined procedure from a lost message.
            tracing::trace!(
                call_id = %call.call_id,
                procedure = %call.procedure,
                "inbound call for undefined procedure; dropped"
            );
            continue;
        };

        tracing::debug!(
            call_id = %call.call_id,
            procedure = %call.procedure,
            "dispatching inbound call"
        );
        if let Some(trace) = &trace {
            trace.on_event(RpcEvent::Handle {
                procedure: &call.procedure,
                call_id: call.call_id,
            });
        }

        let CallMessage {
            procedure,
            call_id,
            args,
        } = call;
        let future = handler(args);
        let transport = transport.clone();
        // Result emission is deferred per call; a slow handler must not
        // hold up unrelated inbound traffic.
        tokio::spawn(async move {
            let outcome = future.await.map_err(|raised| marshal_failure(&raised));
            let reply = ResultMessage {
                procedure,
                call_id,
                outcome,
            }
            .encode();
            if let Err(error) = transport.send(reply) {
                tracing::warn!(%error, "failed to send result message");
            }
        });
    }
}
