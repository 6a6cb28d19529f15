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

//! A declared, typed call surface over the untyped proxy.
//!
//! Run with: `cargo run --example typed_stub`

use msgrpc::{remote_interface, Host, MemoryTransport, Procedures, RpcError};
use serde_json::json;
use std::sync::Arc;

remote_interface! {
    /// The calculator the peer exposes.
    pub struct Calculator {
        async fn add(a: i64, b: i64) -> i64;
        async fn divide(a: f64, b: f64) -> f64;
        async fn describe() -> String;
    }
}

#[tokio::main]
async fn main() -> Result<(), RpcError> {
    let (alpha, beta) = MemoryTransport::pair_default();

    let server = Host::builder(Arc::new(alpha))
        .procedures(
            Procedures::new()
                .define("add", |args| async move {
                    let a = args[0].as_i64().unwrap_or(0);
                    let b = args[1].as_i64().unwrap_or(0);
                    Ok(json!(a + b))
                })
                .define("divide", |args| async move {
                    let a = args[0].as_f64().unwrap_or(0.0);
                    let b = args[1].as_f64().unwrap_or(0.0);
                    if b == 0.0 {
                        Err(json!({ "message": "Division by zero" }))
                    } else {
                        Ok(json!(a / b))
                    }
                })
                .define("describe", |_| async move {
                    Ok(json!("a calculator on the other side of the channel"))
                }),
        )
        .build();

    let client = Host::builder(Arc::new(beta)).build();
    let calculator = Calculator::new(client.create_proxy());

    println!("describe() = {}", calculator.describe().await?);
    println!("add(2, 3) = {}", calculator.add(2, 3).await?);
    println!("divide(9, 3) = {}", calculator.divide(9.0, 3.0).await?);

    match calculator.divide(1.0, 0.0).await {
        Err(error) => println!("divide(1, 0) rejected: {error}"),
        Ok(value) => println!("divide(1, 0) unexpected success: {value}"),
    }

    server.clean_up();
    Ok(())
}
