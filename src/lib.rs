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

#![allow(clippy::module_inception)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

//! # msgrpc - RPC over unordered message channels
//!
//! `msgrpc` implements bidirectional request/response semantics over any
//! asynchronous, unordered, best-effort message channel: a channel that
//! delivers discrete, structured messages to registered listeners with no
//! guarantee beyond "a sent message may eventually be observed by any
//! current listener on the other side".
//!
//! - **Bidirectional**: both peers host procedures and call the other side
//! - **Correlated**: concurrent in-flight calls to the same procedure settle
//!   independently, whatever order their results arrive in
//! - **Noise-tolerant**: malformed and unrelated messages are silently
//!   dropped; the channel may carry foreign traffic
//! - **Timeout-guarded**: a call with no matching result fails after a
//!   configurable window (default 5000 ms)
//!
//! ## Architecture
//!
//! The crate is organized into small layers:
//!
//! - [`transport`]: the injected channel seam ([`Transport`]) plus an
//!   in-memory linked pair for tests and demos
//! - [`wire`]: call identifiers and the two positional message tuples
//! - [`proxy`]: the correlation engine behind [`RemoteProxy`] and the
//!   [`remote_interface!`] typed-stub macro
//! - [`host`]: the per-side entry point ([`Host`]) and its procedure
//!   dispatcher
//! - [`marshal`]: reduction of handler failures to transport-safe values
//! - [`trace`]: an optional observational sink for call lifecycle events
//!
//! ## Quick start
//!
//! ```rust
//! use msgrpc::{Host, MemoryTransport, Procedures};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), msgrpc::RpcError> {
//! let (alpha, beta) = MemoryTransport::pair_default();
//!
//! // One side hosts a procedure set...
//! let server = Host::builder(Arc::new(alpha))
//!     .procedures(Procedures::new().define("add", |args| async move {
//!         let a = args[0].as_i64().unwrap_or(0);
//!         let b = args[1].as_i64().unwrap_or(0);
//!         Ok(json!(a + b))
//!     }))
//!     .build();
//!
//! // ...the other side calls it through a proxy.
//! let client = Host::builder(Arc::new(beta)).build();
//! let proxy = client.create_proxy();
//!
//! let sum = proxy.invoke("add", vec![json!(2), json!(3)]).await?;
//! assert_eq!(sum, json!(5));
//!
//! server.clean_up();
//! # Ok(())
//! # }
//! ```
//!
//! ## Wire format
//!
//! Messages ride the channel as positional JSON arrays:
//!
//! ```text
//! call:   [procedure, call_id, false, ...args]
//! result: [procedure, call_id, true, was_successful, payload]
//! ```
//!
//! Field types are the sole validation performed on receipt; there is no
//! schema or version field, so peers must agree out of band on procedure
//! names and argument shapes. A call to a procedure the peer never defined
//! draws no response at all — the caller experiences it as a timeout,
//! indistinguishable from a lost message.
//!
//! ## Safety
//!
//! `msgrpc` is written in 100% safe Rust with `#![deny(unsafe_code)]`.
//! All concurrency is handled through Tokio's async runtime.

pub mod error;
pub mod host;
pub mod marshal;
pub mod proxy;
pub mod trace;
pub mod transport;
pub mod wire;

pub use error::RpcError;
pub use host::{Host, HostBuilder, Procedures, DEFAULT_CALL_TIMEOUT};
pub use marshal::marshal_failure;
pub use proxy::RemoteProxy;
pub use trace::{RpcEvent, RpcTrace};
pub use transport::{MemoryTransport, MessageStream, Transport, TransportError};
pub use wire::{CallId, CallIdGenerator, CallMessage, ResultMessage};

#[doc(hidden)]
pub use proxy::stubs::{stub_arg, stub_return};
