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

//! Declared, typed call surfaces over a [`RemoteProxy`](crate::RemoteProxy).
//!
//! The peer's procedures and argument shapes are agreed out of band; this
//! module lets that agreement be written down once. [`remote_interface!`]
//! expands a declared set of signatures into a stub struct with one typed
//! async method per procedure — arguments are serialized with serde, the
//! result payload deserialized, and everything in between delegated to the
//! untyped [`invoke`](crate::RemoteProxy::invoke).
//!
//! [`remote_interface!`]: crate::remote_interface

use crate::error::RpcError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Serializes one stub argument into its wire value.
///
/// Used by the code `remote_interface!` generates; not intended to be
/// called directly.
///
/// # Errors
///
/// Returns [`RpcError::Internal`] when the argument cannot be represented
/// as a structured value.
pub fn stub_arg<T: Serialize>(argument: &T) -> Result<Value, RpcError> {
    serde_json::to_value(argument).map_err(|error| RpcError::Internal {
        message: format!("failed to encode argument: {error}"),
    })
}

/// Deserializes a result payload into the stub's declared return type.
///
/// Used by the code `remote_interface!` generates; not intended to be
/// called directly.
///
/// # Errors
///
/// Returns [`RpcError::Internal`] when the payload does not match the
/// declared type — a disagreement between the declared interface and what
/// the peer actually returned.
pub fn stub_return<T: DeserializeOwned>(payload: Value) -> Result<T, RpcError> {
    serde_json::from_value(payload).map_err(|error| RpcError::Internal {
        message: format!("failed to decode result payload: {error}"),
    })
}

/// Declares a typed call surface for the peer's procedures.
///
/// Expands to a struct wrapping a [`RemoteProxy`](crate::RemoteProxy) with
/// one async method per declared signature. Each method serializes its
/// arguments in order, invokes the procedure of the same name, and
/// deserializes the result payload into the declared return type; failures
/// surface as [`RpcError`](crate::RpcError) exactly as with the untyped
/// surface.
///
/// # Example
///
/// ```rust
/// use msgrpc::{remote_interface, Host, MemoryTransport, Procedures};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// remote_interface! {
///     /// The calculator the peer exposes.
///     pub struct Calculator {
///         async fn add(a: i64, b: i64) -> i64;
///         async fn describe() -> String;
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), msgrpc::RpcError> {
/// let (alpha, beta) = MemoryTransport::pair_default();
/// let server = Host::builder(Arc::new(alpha))
///     .procedures(
///         Procedures::new()
///             .define("add", |args| async move {
///                 let a = args[0].as_i64().unwrap_or(0);
///                 let b = args[1].as_i64().unwrap_or(0);
///                 Ok(json!(a + b))
///             })
///             .define("describe", |_args| async move { Ok(json!("adds numbers")) }),
///     )
///     .build();
///
/// let client = Host::builder(Arc::new(beta)).build();
/// let calculator = Calculator::new(client.create_proxy());
///
/// assert_eq!(calculator.add(2, 3).await?, 5);
/// assert_eq!(calculator.describe().await?, "adds numbers");
/// # server.clean_up();
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! remote_interface {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$method_attr:meta])*
                async fn $method:ident ( $( $arg:ident : $arg_ty:ty ),* $(,)? ) -> $ret:ty;
            )*
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            proxy: $crate::RemoteProxy,
        }

        impl $name {
            /// Wraps a remote proxy in this declared call surface.
            $vis fn new(proxy: $crate::RemoteProxy) -> Self {
                Self { proxy }
            }

            /// Returns the underlying untyped proxy.
            $vis fn proxy(&self) -> &$crate::RemoteProxy {
                &self.proxy
            }

            $(
                $(#[$method_attr])*
                $vis async fn $method(
                    &self,
                    $( $arg: $arg_ty ),*
                ) -> ::core::result::Result<$ret, $crate::RpcError> {
                    #[allow(unused_mut)]
                    let mut args = ::std::vec::Vec::new();
                    $( args.push($crate::stub_arg(&$arg)?); )*
                    let payload = self
                        .proxy
                        .invoke(::core::stringify!($method), args)
                        .await?;
                    $crate::stub_return(payload)
                }
            )*
        }
    };
}
