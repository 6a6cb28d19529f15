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

//! The correlation engine behind remote invocations.

use super::pending::PendingCalls;
use crate::error::RpcError;
use crate::trace::{RpcEvent, RpcTrace};
use crate::transport::{MessageStream, Transport};
use crate::wire::{CallIdGenerator, CallMessage, ResultMessage};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A call surface onto the procedures of the peer.
///
/// Each invocation allocates a fresh call id from the proxy's private
/// counter, registers a pending entry, sends the tagged call message, and
/// awaits the correlated result under the configured timeout. A long-lived
/// router task owned by the proxy watches the channel's inbound traffic
/// and settles pending entries as their results arrive — in any order,
/// with anything malformed or unrelated ignored silently.
///
/// Proxies are independent of each other and of the [`Host`](crate::Host)
/// that minted them: each has its own id counter and pending table, and
/// dropping a proxy releases its router. In-flight invocations settle
/// exactly once with one of success, failure, or timeout.
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
/// let server = Host::builder(Arc::new(alpha))
///     .procedures(Procedures::new().define("echo", |args| async move {
///         Ok(args.into_iter().next().unwrap_or_default())
///     }))
///     .build();
///
/// let proxy = Host::builder(Arc::new(beta)).build().create_proxy();
/// assert_eq!(proxy.invoke("echo", vec![json!("hi")]).await?, json!("hi"));
/// # server.clean_up();
/// # Ok(())
/// # }
/// ```
pub struct RemoteProxy {
    transport: Arc<dyn Transport>,
    pending: Arc<PendingCalls>,
    call_ids: CallIdGenerator,
    timeout: Duration,
    trace: Option<Arc<dyn RpcTrace>>,
    router: JoinHandle<()>,
}

impl RemoteProxy {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        timeout: Duration,
        trace: Option<Arc<dyn RpcTrace>>,
    ) -> Self {
        let pending = Arc::new(PendingCalls::new());
        let router = tokio::spawn(route_results(
            transport.subscribe(),
            pending.clone(),
            trace.clone(),
        ));
        Self {
            transport,
            pending,
            call_ids: CallIdGenerator::new(),
            timeout,
            trace,
            router,
        }
    }

    /// Invokes a named procedure on the peer.
    ///
    /// Resolves to the handler's return value, or fails with:
    ///
    /// - [`RpcError::Rejected`] when the peer's handler failed — the
    ///   rejection payload is the marshaled failure value
    /// - [`RpcError::Timeout`] when no matching result arrived within the
    ///   configured window; a procedure the peer never defined looks
    ///   exactly like this, by design
    /// - [`RpcError::Transport`] when the transport refused the outbound
    ///   call message — such failures are not caught here
    ///
    /// A result arriving after the timeout has fired is ignored. Nothing
    /// is retried; re-invoking is the caller's decision.
    pub async fn invoke(&self, procedure: &str, args: Vec<Value>) -> Result<Value, RpcError> {
        let call_id = self.call_ids.next();
        let receiver = self.pending.register(call_id, procedure).await;

        tracing::debug!(%call_id, procedure, "emitting call message");
        if let Some(trace) = &self.trace {
            trace.on_event(RpcEvent::Emit { procedure, call_id });
        }

        let message = CallMessage {
            procedure: procedure.to_owned(),
            call_id,
            args,
        }
        .encode();
        if let Err(error) = self.transport.send(message) {
            self.pending.cancel(call_id).await;
            return Err(error.into());
        }

        match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(payload))) => Err(RpcError::Rejected {
                procedure: procedure.to_owned(),
                payload,
            }),
            Ok(Err(_)) => Err(RpcError::Internal {
                message: "pending call dropped before completion".to_string(),
            }),
            Err(_) => {
                self.pending.cancel(call_id).await;
                tracing::debug!(%call_id, procedure, "call timed out");
                Err(RpcError::Timeout {
                    procedure: procedure.to_owned(),
                    timeout: self.timeout,
                })
            }
        }
    }

    /// Returns the number of in-flight calls on this proxy.
    ///
    /// Useful for monitoring and debugging.
    pub async fn pending_calls(&self) -> usize {
        self.pending.len().await
    }

    /// Returns the timeout applied to each invocation.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Drop for RemoteProxy {
    fn drop(&mut self) {
        // The router holds a transport subscription; releasing the proxy
        // releases the listener.
        self.router.abort();
    }
}

impl std::fmt::Debug for RemoteProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteProxy")
            .field("timeout", &self.timeout)
            .field("next_call_id", &self.call_ids.current())
            .finish_non_exhaustive()
    }
}

/// Settles pending calls as their results arrive on the channel.
async fn route_results(
    mut inbound: MessageStream,
    pending: Arc<PendingCalls>,
    trace: Option<Arc<dyn RpcTrace>>,
) {
    while let Some(raw) = inbound.recv().await {
        let Some(result) = ResultMessage::decode(&raw) else {
            // Unrelated or malformed traffic; the channel is shared.
            continue;
        };
        let was_successful = result.outcome.is_ok();
        let ResultMessage {
            procedure,
            call_id,
            outcome,
        } = result;
        // Trace before delivering so observers see the settlement ahead of
        // the caller resuming.
        if let Some(waiter) = pending.take(&procedure, call_id).await {
            tracing::debug!(%call_id, procedure = %procedure, was_successful, "result settled pending call");
            if let Some(trace) = &trace {
                let event = if was_successful {
                    RpcEvent::Success {
                        procedure: &procedure,
                        call_id,
                    }
                } else {
                    RpcEvent::Fail {
                        procedure: &procedure,
                        call_id,
                    }
                };
                trace.on_event(event);
            }
            let _ = waiter.send(outcome);
        } else {
            tracing::trace!(%call_id, procedure = %procedure, "result matched no pending call; ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use serde_json::json;

    /// Answers every inbound call with `respond(procedure, args)`.
    ///
    /// Subscribes before spawning so no call can slip past the responder.
    fn spawn_responder<F>(transport: MemoryTransport, respond: F)
    where
        F: Fn(&str, Vec<Value>) -> Result<Value, Value> + Send + 'static,
    {
        let mut inbound = transport.subscribe();
        tokio::spawn(async move {
            while let Some(raw) = inbound.recv().await {
                if let Some(call) = CallMessage::decode(&raw) {
                    let outcome = respond(&call.procedure, call.args);
                    let reply = ResultMessage {
                        procedure: call.procedure,
                        call_id: call.call_id,
                        outcome,
                    };
                    let _ = transport.send(reply.encode());
                }
            }
        });
    }

    #[tokio::test]
    async fn test_invoke_resolves_with_result() {
        let (alpha, beta) = MemoryTransport::pair_default();
        spawn_responder(beta, |_, mut args| Ok(args.pop().unwrap_or(Value::Null)));

        let proxy = RemoteProxy::new(Arc::new(alpha), Duration::from_millis(500), None);
        let value = proxy.invoke("echo", vec![json!("pong")]).await.unwrap();
        assert_eq!(value, json!("pong"));
        assert_eq!(proxy.pending_calls().await, 0);
    }

    #[tokio::test]
    async fn test_invoke_rejects_with_payload() {
        let (alpha, beta) = MemoryTransport::pair_default();
        spawn_responder(beta, |_, _| Err(json!("no such thing")));

        let proxy = RemoteProxy::new(Arc::new(alpha), Duration::from_millis(500), None);
        let error = proxy.invoke("lookup", vec![]).await.unwrap_err();
        assert_eq!(error.rejection_payload(), Some(&json!("no such thing")));
    }

    #[tokio::test]
    async fn test_invoke_times_out_without_responder() {
        let (alpha, _beta) = MemoryTransport::pair_default();

        let proxy = RemoteProxy::new(Arc::new(alpha), Duration::from_millis(50), None);
        let error = proxy.invoke("anyone", vec![]).await.unwrap_err();
        assert!(error.is_timeout());
        // The timed-out entry was reclaimed.
        assert_eq!(proxy.pending_calls().await, 0);
    }

    #[tokio::test]
    async fn test_call_ids_increase_per_invocation() {
        let (alpha, beta) = MemoryTransport::pair_default();

        let seen = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let record = seen.clone();
        tokio::spawn({
            let mut inbound = beta.subscribe();
            async move {
                while let Some(raw) = inbound.recv().await {
                    if let Some(call) = CallMessage::decode(&raw) {
                        record.lock().await.push(call.call_id.as_u64());
                        let _ = beta.send(
                            ResultMessage {
                                procedure: call.procedure,
                                call_id: call.call_id,
                                outcome: Ok(Value::Null),
                            }
                            .encode(),
                        );
                    }
                }
            }
        });

        let proxy = RemoteProxy::new(Arc::new(alpha), Duration::from_millis(500), None);
        proxy.invoke("first", vec![]).await.unwrap();
        proxy.invoke("second", vec![]).await.unwrap();
        proxy.invoke("third", vec![]).await.unwrap();

        assert_eq!(*seen.lock().await, vec![0, 1, 2]);
    }
}
