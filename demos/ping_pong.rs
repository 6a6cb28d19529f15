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

//! Two hosts on one in-memory channel, each calling the other.
//!
//! Run with: `cargo run --example ping_pong`

use msgrpc::{Host, MemoryTransport, Procedures, RpcError};
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), RpcError> {
    let (alpha, beta) = MemoryTransport::pair_default();

    // Each side defines its own procedures and holds a proxy onto the
    // other's. The roles are fully symmetric.
    let left = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("ping", |_| async move { Ok(json!("pong from left")) }))
        .build();

    let right = Host::builder(Arc::new(beta))
        .procedures(
            Procedures::new()
                .define("ping", |_| async move { Ok(json!("pong from right")) })
                .define("shout", |args| async move {
                    match args.first().and_then(|v| v.as_str()) {
                        Some(text) => Ok(json!(text.to_uppercase())),
                        None => Err(json!({ "message": "nothing to shout" })),
                    }
                }),
        )
        .build();

    let toward_right = left.create_proxy();
    let toward_left = right.create_proxy();

    println!("left  -> right: {}", toward_right.invoke("ping", vec![]).await?);
    println!("right -> left:  {}", toward_left.invoke("ping", vec![]).await?);

    let loud = toward_right.invoke("shout", vec![json!("hello")]).await?;
    println!("left  -> right: {loud}");

    // A failing handler surfaces as a rejection with the marshaled
    // message.
    match toward_right.invoke("shout", vec![]).await {
        Err(error) => println!("left  -> right: rejected: {error}"),
        Ok(value) => println!("left  -> right: unexpected success: {value}"),
    }

    left.clean_up();
    right.clean_up();
    Ok(())
}
