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

//! The caller side: correlation engine and typed stubs.
//!
//! A [`RemoteProxy`] turns named invocations into tagged call messages and
//! matches the peer's eventual result messages back to the awaiting
//! callers. Correlation is a dispatch-table lookup: each proxy owns a table
//! of pending calls keyed by call id, fed by one long-lived router task
//! that filters the channel's inbound traffic — concurrent in-flight calls
//! settle independently whatever order their results arrive in.
//!
//! Proxies are minted by [`Host::create_proxy`](crate::Host::create_proxy).
//! The untyped [`RemoteProxy::invoke`] surface works for dynamic callers;
//! the [`remote_interface!`](crate::remote_interface) macro wraps it in a
//! declared, typed call surface.

mod pending;
#[allow(clippy::module_inception)]
mod proxy;
pub mod stubs;

pub use proxy::RemoteProxy;
