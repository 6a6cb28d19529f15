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

//! Integration tests for host lifecycle and end-to-end call semantics:
//! symmetric bidirectional hosting, failure marshaling, timeout behavior,
//! teardown, typed stubs, and trace events.

use msgrpc::{remote_interface, Host, MemoryTransport, Procedures, RpcEvent, RpcTrace};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

#[tokio::test]
async fn test_symmetric_hosts_answer_each_other() {
    let (alpha, beta) = MemoryTransport::pair_default();

    let left = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("test", |_| async move { Ok(json!("A TEST")) }))
        .build();
    let right = Host::builder(Arc::new(beta))
        .procedures(Procedures::new().define("test", |_| async move { Ok(json!("B TEST")) }))
        .build();

    // Each side holds a proxy onto the other's procedures.
    let toward_left = right.create_proxy();
    let toward_right = left.create_proxy();

    assert_eq!(toward_left.invoke("test", vec![]).await.unwrap(), json!("A TEST"));
    assert_eq!(toward_right.invoke("test", vec![]).await.unwrap(), json!("B TEST"));

    left.clean_up();
    right.clean_up();
}

#[tokio::test]
async fn test_async_handler_resolves() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let _server = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("compute", |args| async move {
            sleep(Duration::from_millis(20)).await;
            Ok(json!(args[0].as_i64().unwrap_or(0) + 1))
        }))
        .build();
    let client = Host::builder(Arc::new(beta)).build();
    let proxy = client.create_proxy();

    assert_eq!(proxy.invoke("compute", vec![json!(41)]).await.unwrap(), json!(42));
}

#[tokio::test]
async fn test_failure_marshaling_rules() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let _server = Host::builder(Arc::new(alpha))
        .procedures(
            Procedures::new()
                .define("fail_with_error_object", |_| async move {
                    Err(json!({ "message": "Simulated fail", "stack": "irrelevant" }))
                })
                .define("fail_with_string", |_| async move { Err(json!("plain failure")) })
                .define("fail_opaque", |_| async move { Err(json!(42)) })
                .define("fail_late", |_| async move {
                    sleep(Duration::from_millis(20)).await;
                    Err(json!({ "message": "late failure" }))
                }),
        )
        .build();
    let client = Host::builder(Arc::new(beta)).build();
    let proxy = client.create_proxy();

    // An error-like object collapses to its message string.
    let error = proxy.invoke("fail_with_error_object", vec![]).await.unwrap_err();
    assert_eq!(error.rejection_payload(), Some(&json!("Simulated fail")));

    // A plain string crosses as itself.
    let error = proxy.invoke("fail_with_string", vec![]).await.unwrap_err();
    assert_eq!(error.rejection_payload(), Some(&json!("plain failure")));

    // Anything else is not transportable and collapses to null.
    let error = proxy.invoke("fail_opaque", vec![]).await.unwrap_err();
    assert_eq!(error.rejection_payload(), Some(&Value::Null));

    // An asynchronous failure marshals the same way as an immediate one.
    let error = proxy.invoke("fail_late", vec![]).await.unwrap_err();
    assert_eq!(error.rejection_payload(), Some(&json!("late failure")));
}

#[tokio::test]
async fn test_undefined_procedure_fails_only_by_timeout() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let _server = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("defined", |_| async move { Ok(Value::Null) }))
        .build();
    let client = Host::builder(Arc::new(beta))
        .timeout(Duration::from_millis(100))
        .build();
    let proxy = client.create_proxy();

    let started = Instant::now();
    let error = proxy.invoke("not_defined", vec![]).await.unwrap_err();

    // No explicit "unknown procedure" failure exists; only the generic
    // timeout after the full window.
    assert!(error.is_timeout());
    assert_eq!(error.procedure(), Some("not_defined"));
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_short_timeout_beats_slow_handler() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let _server = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("slow", |_| async move {
            sleep(Duration::from_millis(300)).await;
            Ok(json!("eventually"))
        }))
        .build();
    let client = Host::builder(Arc::new(beta))
        .timeout(Duration::from_millis(100))
        .build();
    let proxy = client.create_proxy();

    let started = Instant::now();
    let error = proxy.invoke("slow", vec![]).await.unwrap_err();

    // The caller rejects on its own timer, before the handler ever
    // settles.
    assert!(error.is_timeout());
    assert!(started.elapsed() < Duration::from_millis(300));
}

#[tokio::test]
async fn test_clean_up_stops_all_responses() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let server = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("test", |_| async move { Ok(json!("alive")) }))
        .build();
    let client = Host::builder(Arc::new(beta))
        .timeout(Duration::from_millis(100))
        .build();
    let proxy = client.create_proxy();

    assert_eq!(proxy.invoke("test", vec![]).await.unwrap(), json!("alive"));

    server.clean_up();

    let error = proxy.invoke("test", vec![]).await.unwrap_err();
    assert!(error.is_timeout());
}

#[tokio::test]
async fn test_dropping_host_stops_responses() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let server = Host::builder(Arc::new(alpha))
        .procedures(Procedures::new().define("test", |_| async move { Ok(json!("alive")) }))
        .build();
    let client = Host::builder(Arc::new(beta))
        .timeout(Duration::from_millis(100))
        .build();
    let proxy = client.create_proxy();

    assert_eq!(proxy.invoke("test", vec![]).await.unwrap(), json!("alive"));

    drop(server);

    let error = proxy.invoke("test", vec![]).await.unwrap_err();
    assert!(error.is_timeout());
}

remote_interface! {
    /// The calculator surface the peer exposes.
    pub struct Calculator {
        async fn add(a: i64, b: i64) -> i64;
        async fn divide(a: f64, b: f64) -> f64;
    }
}

#[tokio::test]
async fn test_typed_stub_round_trip() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let _server = Host::builder(Arc::new(alpha))
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
                }),
        )
        .build();
    let client = Host::builder(Arc::new(beta)).build();
    let calculator = Calculator::new(client.create_proxy());

    assert_eq!(calculator.add(2, 3).await.unwrap(), 5);
    assert_eq!(calculator.divide(9.0, 3.0).await.unwrap(), 3.0);

    let error = calculator.divide(1.0, 0.0).await.unwrap_err();
    assert_eq!(error.rejection_payload(), Some(&json!("Division by zero")));

    // The untyped surface remains reachable behind the stub.
    assert_eq!(calculator.proxy().pending_calls().await, 0);
}

/// Records every trace event as `"kind:procedure"`.
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn snapshot(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RpcTrace for Recorder {
    fn on_event(&self, event: RpcEvent<'_>) {
        let kind = match event {
            RpcEvent::Emit { .. } => "emit",
            RpcEvent::Handle { .. } => "handle",
            RpcEvent::Success { .. } => "success",
            RpcEvent::Fail { .. } => "fail",
        };
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:{}", kind, event.procedure()));
    }
}

#[tokio::test]
async fn test_trace_observes_call_lifecycle() {
    let (alpha, beta) = MemoryTransport::pair_default();
    let server_trace = Arc::new(Recorder::default());
    let client_trace = Arc::new(Recorder::default());

    let _server = Host::builder(Arc::new(alpha))
        .procedures(
            Procedures::new()
                .define("ping", |_| async move { Ok(json!("pong")) })
                .define("boom", |_| async move { Err(json!("bang")) }),
        )
        .trace(server_trace.clone())
        .build();
    let client = Host::builder(Arc::new(beta))
        .trace(client_trace.clone())
        .build();
    let proxy = client.create_proxy();

    proxy.invoke("ping", vec![]).await.unwrap();
    proxy.invoke("boom", vec![]).await.unwrap_err();

    let client_events = client_trace.snapshot();
    assert_eq!(
        client_events,
        vec!["emit:ping", "success:ping", "emit:boom", "fail:boom"]
    );

    let server_events = server_trace.snapshot();
    assert_eq!(server_events, vec!["handle:ping", "handle:boom"]);
}
