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

//! Tracking of pending calls awaiting results.

use crate::wire::CallId;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::{oneshot, Mutex};

/// The settled outcome of one call: the return value, or the marshaled
/// failure payload.
pub(crate) type CallOutcome = Result<Value, Value>;

/// The dispatch table of in-flight calls, owned by one proxy instance.
///
/// Entries are keyed by call id and carry the procedure name the call was
/// issued under: a result settles an entry only when BOTH match. The first
/// matching result removes the entry, so duplicate or replayed results for
/// the same id are no-ops.
#[derive(Debug)]
pub(crate) struct PendingCalls {
    calls: Mutex<HashMap<CallId, PendingCall>>,
}

#[derive(Debug)]
struct PendingCall {
    procedure: String,
    waiter: oneshot::Sender<CallOutcome>,
}

impl PendingCalls {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a pending call and returns the receiver its outcome will
    /// be delivered on.
    pub(crate) async fn register(
        &self,
        call_id: CallId,
        procedure: &str,
    ) -> oneshot::Receiver<CallOutcome> {
        let (waiter, receiver) = oneshot::channel();
        self.calls.lock().await.insert(
            call_id,
            PendingCall {
                procedure: procedure.to_owned(),
                waiter,
            },
        );
        receiver
    }

    /// Removes and returns the waiter matching both `procedure` and
    /// `call_id`, if one is pending.
    ///
    /// The removal is what makes result matching idempotent: a duplicate
    /// or replayed result finds nothing.
    pub(crate) async fn take(
        &self,
        procedure: &str,
        call_id: CallId,
    ) -> Option<oneshot::Sender<CallOutcome>> {
        let mut calls = self.calls.lock().await;
        if let Entry::Occupied(entry) = calls.entry(call_id) {
            if entry.get().procedure == procedure {
                return Some(entry.remove().waiter);
            }
        }
        None
    }

    /// Abandons a pending call (on timeout).
    ///
    /// Returns `true` if the call was still pending.
    pub(crate) async fn cancel(&self, call_id: CallId) -> bool {
        self.calls.lock().await.remove(&call_id).is_some()
    }

    /// Returns the number of in-flight calls.
    pub(crate) async fn len(&self) -> usize {
        self.calls.lock().await.len()
    }
}
