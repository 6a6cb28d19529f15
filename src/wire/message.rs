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

//! The two positional message tuples.

use super::CallId;
use serde_json::Value;

/// An outbound remote invocation request.
///
/// Encodes as `[procedure, call_id, false, ...args]`. The trailing
/// arguments are variadic; a call with no arguments is a three-element
/// array.
#[derive(Debug, Clone, PartialEq)]
pub struct CallMessage {
    /// The procedure being invoked on the peer.
    pub procedure: String,
    /// The id correlating the eventual result back to this call.
    pub call_id: CallId,
    /// The ordered argument list, already in structured form.
    pub args: Vec<Value>,
}

impl CallMessage {
    /// Encodes this call into its wire tuple.
    #[must_use]
    pub fn encode(self) -> Value {
        let mut tuple = Vec::with_capacity(3 + self.args.len());
        tuple.push(Value::String(self.procedure));
        tuple.push(Value::from(self.call_id.as_u64()));
        tuple.push(Value::Bool(false));
        tuple.extend(self.args);
        Value::Array(tuple)
    }

    /// Decodes a wire message into a call, if it has the call shape.
    ///
    /// Shape checks: an array of at least three elements whose first is a
    /// string, second an unsigned integer, and third the literal `false`.
    /// Everything else — including result tuples — yields `None` so the
    /// dispatcher can ignore it without error.
    #[must_use]
    pub fn decode(message: &Value) -> Option<Self> {
        let tuple = message.as_array()?;
        if tuple.len() < 3 {
            return None;
        }
        let procedure = tuple[0].as_str()?;
        let call_id = tuple[1].as_u64()?;
        if tuple[2] != Value::Bool(false) {
            return None;
        }
        Some(Self {
            procedure: procedure.to_owned(),
            call_id: CallId::from(call_id),
            args: tuple[3..].to_vec(),
        })
    }
}

/// The outcome of a previously sent call.
///
/// Encodes as `[procedure, call_id, true, was_successful, payload]` —
/// always exactly five elements. The payload is the handler's return value
/// on success or the marshaled failure value otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMessage {
    /// The procedure the originating call invoked.
    pub procedure: String,
    /// The id of the call this result settles.
    pub call_id: CallId,
    /// The settled outcome: return value or marshaled failure.
    pub outcome: Result<Value, Value>,
}

impl ResultMessage {
    /// Encodes this result into its wire tuple.
    #[must_use]
    pub fn encode(self) -> Value {
        let (was_successful, payload) = match self.outcome {
            Ok(value) => (true, value),
            Err(failure) => (false, failure),
        };
        Value::Array(vec![
            Value::String(self.procedure),
            Value::from(self.call_id.as_u64()),
            Value::Bool(true),
            Value::Bool(was_successful),
            payload,
        ])
    }

    /// Decodes a wire message into a result, if it has the result shape.
    ///
    /// Shape checks: an array of exactly five elements whose first is a
    /// string, second an unsigned integer, third the literal `true`, and
    /// fourth a boolean. The channel may carry unrelated traffic, so
    /// anything failing these checks yields `None` rather than an error.
    #[must_use]
    pub fn decode(message: &Value) -> Option<Self> {
        let tuple = message.as_array()?;
        if tuple.len() != 5 {
            return None;
        }
        let procedure = tuple[0].as_str()?;
        let call_id = tuple[1].as_u64()?;
        if tuple[2] != Value::Bool(true) {
            return None;
        }
        let was_successful = tuple[3].as_bool()?;
        let payload = tuple[4].clone();
        Some(Self {
            procedure: procedure.to_owned(),
            call_id: CallId::from(call_id),
            outcome: if was_successful {
                Ok(payload)
            } else {
                Err(payload)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_round_trip() {
        let call = CallMessage {
            procedure: "add".to_string(),
            call_id: CallId::from(3),
            args: vec![json!(1), json!(2)],
        };
        let encoded = call.clone().encode();
        assert_eq!(encoded, json!(["add", 3, false, 1, 2]));
        assert_eq!(CallMessage::decode(&encoded), Some(call));
    }

    #[test]
    fn test_call_without_args() {
        let call = CallMessage {
            procedure: "ping".to_string(),
            call_id: CallId::from(0),
            args: vec![],
        };
        let encoded = call.clone().encode();
        assert_eq!(encoded, json!(["ping", 0, false]));
        assert_eq!(CallMessage::decode(&encoded), Some(call));
    }

    #[test]
    fn test_call_rejects_malformed_shapes() {
        // Not an array at all.
        assert_eq!(CallMessage::decode(&json!("add")), None);
        assert_eq!(CallMessage::decode(&json!({"procedure": "add"})), None);
        // Wrong arity.
        assert_eq!(CallMessage::decode(&json!(["add", 1])), None);
        // Non-string name.
        assert_eq!(CallMessage::decode(&json!([1, 1, false])), None);
        // Non-integer id.
        assert_eq!(CallMessage::decode(&json!(["add", "one", false])), None);
        assert_eq!(CallMessage::decode(&json!(["add", 1.5, false])), None);
        // Result-flagged tuples are not calls.
        assert_eq!(CallMessage::decode(&json!(["add", 1, true, true, 2])), None);
        // Flag must be a literal boolean, not a truthy stand-in.
        assert_eq!(CallMessage::decode(&json!(["add", 1, 0])), None);
        assert_eq!(CallMessage::decode(&json!(["add", 1, null])), None);
    }

    #[test]
    fn test_result_round_trip_success() {
        let result = ResultMessage {
            procedure: "add".to_string(),
            call_id: CallId::from(3),
            outcome: Ok(json!(5)),
        };
        let encoded = result.clone().encode();
        assert_eq!(encoded, json!(["add", 3, true, true, 5]));
        assert_eq!(ResultMessage::decode(&encoded), Some(result));
    }

    #[test]
    fn test_result_round_trip_failure() {
        let result = ResultMessage {
            procedure: "add".to_string(),
            call_id: CallId::from(3),
            outcome: Err(json!("Simulated fail")),
        };
        let encoded = result.clone().encode();
        assert_eq!(encoded, json!(["add", 3, true, false, "Simulated fail"]));
        assert_eq!(ResultMessage::decode(&encoded), Some(result));
    }

    #[test]
    fn test_result_rejects_malformed_shapes() {
        // Wrong arity: the result layout is exact.
        assert_eq!(ResultMessage::decode(&json!(["add", 3, true, true])), None);
        assert_eq!(
            ResultMessage::decode(&json!(["add", 3, true, true, 5, "extra"])),
            None
        );
        // Call-flagged tuples are not results.
        assert_eq!(
            ResultMessage::decode(&json!(["add", 3, false, true, 5])),
            None
        );
        // Success flag must be a boolean.
        assert_eq!(
            ResultMessage::decode(&json!(["add", 3, true, "yes", 5])),
            None
        );
        // Non-string name, non-integer id.
        assert_eq!(ResultMessage::decode(&json!([3, 3, true, true, 5])), None);
        assert_eq!(
            ResultMessage::decode(&json!(["add", null, true, true, 5])),
            None
        );
    }

    #[test]
    fn test_result_payload_may_be_any_value() {
        let encoded = json!(["add", 1, true, true, {"nested": [1, 2]}]);
        let decoded = ResultMessage::decode(&encoded).unwrap();
        assert_eq!(decoded.outcome, Ok(json!({"nested": [1, 2]})));

        let encoded = json!(["add", 1, true, false, null]);
        let decoded = ResultMessage::decode(&encoded).unwrap();
        assert_eq!(decoded.outcome, Err(Value::Null));
    }
}
