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

//! Reduction of handler failures to transport-safe values.
//!
//! The channel is assumed to carry only structurally serializable data: no
//! live object identity, no prototypes, no stack traces. Before a handler
//! failure crosses the channel it is collapsed to the most useful
//! transportable value it contains.

use serde_json::Value;

/// Reduces a structured failure value to a transport-safe representation.
///
/// Rules, in order:
///
/// 1. `Null` stays `Null`
/// 2. a string is carried as-is
/// 3. any object exposing a string `"message"` member (the shape of native
///    error objects and error-like records) collapses to that message string
/// 4. anything else becomes `Null`
///
/// Loss of richer error structure — stacks, subclass identity, non-message
/// members — is an accepted, explicit limitation of the protocol.
///
/// # Examples
///
/// ```rust
/// use msgrpc::marshal_failure;
/// use serde_json::{json, Value};
///
/// assert_eq!(marshal_failure(&json!("boom")), json!("boom"));
/// assert_eq!(
///     marshal_failure(&json!({ "message": "broken", "stack": "..." })),
///     json!("broken"),
/// );
/// assert_eq!(marshal_failure(&json!(42)), Value::Null);
/// ```
#[must_use]
pub fn marshal_failure(raised: &Value) -> Value {
    match raised {
        Value::Null => Value::Null,
        Value::String(message) => Value::String(message.clone()),
        Value::Object(members) => match members.get("message") {
            Some(Value::String(message)) => Value::String(message.clone()),
            _ => Value::Null,
        },
        _ => Value::Null,
    }
}
