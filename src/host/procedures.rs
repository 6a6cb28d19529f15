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

//! The named procedures a host exposes to its peer.

use futures_util::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A boxed local handler: ordered arguments in, settled outcome out.
pub(crate) type ProcedureFn =
    dyn Fn(Vec<Value>) -> BoxFuture<'static, Result<Value, Value>> + Send + Sync;

/// The set of named local procedures a [`Host`](crate::Host) exposes.
///
/// Names are unique within a set — defining a name twice replaces the
/// earlier handler. The set is handed to the host builder once and is
/// immutable for the host's lifetime.
///
/// Handlers take their arguments as structured values in call order and
/// settle with `Ok(return_value)` or `Err(failure_value)`. A failure value
/// is marshaled before it crosses the channel: callers receive the
/// failure's `"message"` string, the failure itself if it was a plain
/// string, or `Null` (see [`marshal_failure`](crate::marshal_failure)).
///
/// # Example
///
/// ```rust
/// use msgrpc::Procedures;
/// use serde_json::json;
///
/// let procedures = Procedures::new()
///     .define("add", |args| async move {
///         let a = args[0].as_i64().unwrap_or(0);
///         let b = args[1].as_i64().unwrap_or(0);
///         Ok(json!(a + b))
///     })
///     .define("divide", |args| async move {
///         let a = args[0].as_f64().unwrap_or(0.0);
///         let b = args[1].as_f64().unwrap_or(0.0);
///         if b == 0.0 {
///             Err(json!({ "message": "Division by zero" }))
///         } else {
///             Ok(json!(a / b))
///         }
///     });
///
/// assert_eq!(procedures.len(), 2);
/// assert!(procedures.contains("add"));
/// ```
#[derive(Default)]
pub struct Procedures {
    handlers: HashMap<String, Arc<ProcedureFn>>,
}

impl Procedures {
    /// Creates an empty procedure set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a named procedure.
    ///
    /// The handler is an async function from the ordered argument list to
    /// a settled outcome. Defining an already-present name replaces the
    /// earlier handler — names are unique within the set.
    #[must_use]
    pub fn define<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, Value>> + Send + 'static,
    {
        self.handlers
            .insert(name.into(), Arc::new(move |args| Box::pin(handler(args))));
        self
    }

    /// Returns the handler registered under `name`, if any.
    pub(crate) fn get(&self, name: &str) -> Option<Arc<ProcedureFn>> {
        self.handlers.get(name).cloned()
    }

    /// Returns `true` if a procedure is defined under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Returns the number of defined procedures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no procedures are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates the defined procedure names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl fmt::Debug for Procedures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedures")
            .field("names", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_define_and_get() {
        let procedures = Procedures::new().define("echo", |mut args| async move {
            Ok(args.pop().unwrap_or(Value::Null))
        });

        let handler = procedures.get("echo").unwrap();
        let outcome = handler(vec![json!("hello")]).await;
        assert_eq!(outcome, Ok(json!("hello")));
    }

    #[test]
    fn test_get_undefined_name() {
        let procedures = Procedures::new();
        assert!(procedures.get("missing").is_none());
        assert!(!procedures.contains("missing"));
    }

    #[tokio::test]
    async fn test_redefining_replaces_handler() {
        let procedures = Procedures::new()
            .define("version", |_| async move { Ok(json!(1)) })
            .define("version", |_| async move { Ok(json!(2)) });

        assert_eq!(procedures.len(), 1);
        let handler = procedures.get("version").unwrap();
        assert_eq!(handler(vec![]).await, Ok(json!(2)));
    }

    #[test]
    fn test_empty_set() {
        let procedures = Procedures::new();
        assert!(procedures.is_empty());
        assert_eq!(procedures.len(), 0);
        assert_eq!(procedures.names().count(), 0);
    }

    #[tokio::test]
    async fn test_handlers_may_fail() {
        let procedures = Procedures::new().define("always_fails", |_| async move {
            Err(json!({ "message": "Simulated fail" }))
        });

        let handler = procedures.get("always_fails").unwrap();
        let outcome = handler(vec![]).await;
        assert_eq!(outcome, Err(json!({ "message": "Simulated fail" })));
    }
}
