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

//! Wire format for call and result messages.
//!
//! Both message kinds are positional, order-significant JSON arrays:
//!
//! ```text
//! call:   [procedure, call_id, false, ...args]
//! result: [procedure, call_id, true, was_successful, payload]
//! ```
//!
//! The third element distinguishes the two kinds. Field types are the sole
//! validation performed on receipt — decoding returns `None` for anything
//! that fails the shape checks, so both ends can drop malformed or
//! unrelated traffic without raising an error. There is no schema or
//! version field; peers agree out of band on procedure names and
//! argument/result shapes.

mod id;
mod message;

pub use id::{CallId, CallIdGenerator};
pub use message::{CallMessage, ResultMessage};
