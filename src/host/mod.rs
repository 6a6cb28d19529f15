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

//! The per-side entry point: procedure hosting and proxy minting.
//!
//! A [`Host`] is built once per side of the channel from an explicitly
//! injected transport. It plays both roles of the protocol: with a
//! non-empty [`Procedures`] set it dispatches inbound call messages to
//! local handlers and answers with correlated results; and through
//! [`Host::create_proxy`] it mints call surfaces onto whatever the peer
//! hosts. A side that only calls simply builds with no procedures — such a
//! host registers no inbound listener at all.

#[allow(clippy::module_inception)]
mod host;
mod procedures;

pub use host::{Host, HostBuilder, DEFAULT_CALL_TIMEOUT};
pub use procedures::Procedures;
