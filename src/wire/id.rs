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

//! Call identifiers and their per-proxy allocator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one in-flight call within its issuing proxy instance.
///
/// Call ids are scoped to the proxy that allocated them: uniqueness holds
/// among that proxy's outstanding calls, not across proxies or peers. They
/// cross the wire as plain JSON numbers.
///
/// # Example
///
/// ```rust
/// use msgrpc::CallId;
///
/// let id = CallId::from(42);
/// assert_eq!(id.as_u64(), 42);
/// assert_eq!(format!("{}", id), "Call(42)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(u64);

impl CallId {
    /// Returns the call id as a u64.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for CallId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CallId> for u64 {
    fn from(id: CallId) -> Self {
        id.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Call({})", self.0)
    }
}

/// Allocates call ids for request-response matching.
///
/// Each proxy instance owns one generator. Ids start at 0 and increment
/// monotonically per invocation; they are never reset and never reused
/// while a call is outstanding, which is what lets concurrent calls to the
/// same procedure settle independently. The u64 space makes wraparound a
/// non-concern in practice.
///
/// # Thread Safety
///
/// The generator is lock-free and can be shared across tasks.
///
/// # Example
///
/// ```rust
/// use msgrpc::CallIdGenerator;
///
/// let generator = CallIdGenerator::new();
/// assert_eq!(generator.next().as_u64(), 0);
/// assert_eq!(generator.next().as_u64(), 1);
/// ```
#[derive(Debug)]
pub struct CallIdGenerator {
    next_id: AtomicU64,
}

impl CallIdGenerator {
    /// Creates a new generator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
        }
    }

    /// Allocates the next call id.
    #[must_use]
    pub fn next(&self) -> CallId {
        CallId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the id the next allocation will produce, without allocating.
    ///
    /// Primarily useful for tests and debugging.
    #[must_use]
    pub fn current(&self) -> CallId {
        CallId(self.next_id.load(Ordering::Relaxed))
    }
}

impl Default for CallIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
