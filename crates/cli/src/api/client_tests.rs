// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the dispatcher.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::client::{ApiClient, ApiError, Session};
use super::interceptor::FailureKind;
use super::params::Params;
use super::resource::{HttpMethod, ResourceSpec, EVENTS, REGISTRY, TICKETS, USERS};
use super::transport::TransportError;
use super::transport_tests::{MockTransport, RecordingInterceptor};
use em_core::{AppInstanceId, Reply};
use serde_json::json;
use std::sync::Arc;
use yare::parameterized;

const INSTANCE: &str = "6f9619ff-8b86-d011-b42d-00c04fc964ff";

fn make_client(root: &str) -> (ApiClient, MockTransport, RecordingInterceptor) {
    let transport = MockTransport::new();
    let interceptor = RecordingInterceptor::default();
    let session = Session::with_instance_id(INSTANCE.parse::<AppInstanceId>().unwrap());
    let client = ApiClient::with_transport(
        root,
        transport.clone(),
        session,
        Arc::new(interceptor.clone()),
    )
    .unwrap();
    (client, transport, interceptor)
}

#[parameterized(
    with_slash = { "http://localhost:5242/", "http://localhost:5242/" },
    without_slash = { "http://localhost:5242", "http://localhost:5242/" },
    sub_path = { "https://example.org/eventman", "https://example.org/eventman/" },
)]
fn root_always_ends_in_slash(root: &str, expected: &str) {
    let (client, _, _) = make_client(root);
    assert_eq!(client.root().as_str(), expected);
}

#[parameterized(
    relative = { "events" },
    ftp = { "ftp://example.org/" },
)]
fn root_must_be_http(root: &str) {
    let result = ApiClient::with_transport(
        root,
        MockTransport::new(),
        Session::new(),
        Arc::new(RecordingInterceptor::default()),
    );
    assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
}

#[tokio::test]
async fn test_relative_templates_resolve_under_root() {
    let (client, transport, _) = make_client("https://example.org/eventman/");
    client
        .invoke(&EVENTS, "get", Params::new().with("id", "42"), None)
        .await
        .unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "https://example.org/eventman/events/42"
    );
}

#[tokio::test]
async fn test_absolute_templates_resolve_from_origin() {
    let (client, transport, _) = make_client("https://example.org/eventman/");
    client.invoke(&TICKETS, "all", Params::new(), None).await.unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "https://example.org/tickets"
    );
}

#[tokio::test]
async fn test_entity_fields_fill_placeholders() {
    let (client, transport, _) = make_client("http://localhost:5242/");
    let event = json!({ "_id": "e1", "title": "Linux Day" });
    client
        .invoke(&EVENTS, "update", Params::new(), Some(event.clone()))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.url.as_str(), "http://localhost:5242/events/e1");
    assert_eq!(request.body, Some(event));
}

#[tokio::test]
async fn test_caller_params_override_entity_fields() {
    let (client, transport, _) = make_client("http://localhost:5242/");
    let event = json!({ "_id": "e1" });
    client
        .invoke(
            &EVENTS,
            "update",
            Params::new().with("id", "e2"),
            Some(event),
        )
        .await
        .unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "http://localhost:5242/events/e2"
    );
}

#[tokio::test]
async fn test_get_derives_params_without_sending_body() {
    let (client, transport, _) = make_client("http://localhost:5242/");
    client
        .invoke(&EVENTS, "get", Params::new(), Some(json!({ "_id": 7 })))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.url.as_str(), "http://localhost:5242/events/7");
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_leftover_params_become_query() {
    let (client, transport, _) = make_client("http://localhost:5242/");
    client
        .invoke(&USERS, "all", Params::new().with("sort", "name"), None)
        .await
        .unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "http://localhost:5242/users?sort=name"
    );
}

#[parameterized(
    add = {
        "add",
        json!({ "event_id": "e1", "name": "Ann" }),
        HttpMethod::Post,
        "http://localhost:5242/events/e1/tickets?uuid=6f9619ff-8b86-d011-b42d-00c04fc964ff"
    },
    update = {
        "update",
        json!({ "_id": "t1", "event_id": "e1", "name": "Ann" }),
        HttpMethod::Put,
        "http://localhost:5242/events/e1/tickets/t1?uuid=6f9619ff-8b86-d011-b42d-00c04fc964ff"
    },
    delete = {
        "delete",
        json!({ "_id": "t1", "event_id": "e1" }),
        HttpMethod::Delete,
        "http://localhost:5242/events/e1/tickets/t1?uuid=6f9619ff-8b86-d011-b42d-00c04fc964ff"
    },
)]
fn ticket_mutations_carry_instance_id(
    operation: &str,
    ticket: serde_json::Value,
    method: HttpMethod,
    expected: &str,
) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let (client, transport, _) = make_client("http://localhost:5242/");
        client
            .invoke(&TICKETS, operation, Params::new(), Some(ticket.clone()))
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, method);
        assert_eq!(request.url.as_str(), expected);
        let sent = if method.has_body() { Some(ticket) } else { None };
        assert_eq!(request.body, sent);
    });
}

#[tokio::test]
async fn test_caller_cannot_replace_instance_id() {
    let (client, transport, _) = make_client("http://localhost:5242/");
    let params = Params::new()
        .with("event_id", "e1")
        .with("uuid", "forged")
        .with("ticket_id", "t1");
    client
        .invoke(&TICKETS, "delete", params, None)
        .await
        .unwrap();

    let url = transport.last_request().url;
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("uuid".to_string(), INSTANCE.to_string())]);
}

#[tokio::test]
async fn test_success_is_normalized() {
    let (client, transport, interceptor) = make_client("http://localhost:5242/");
    transport.respond(
        200,
        r#"{"events":[{"_id":"e1","begin-date":"2015-04-25T10:00:00Z"}]}"#,
    );

    let reply = client
        .invoke(&EVENTS, "all", Params::new(), None)
        .await
        .unwrap();
    assert_eq!(
        reply,
        Reply::Data(json!([{
            "_id": "e1",
            "begin-date": 1_429_956_000_000_i64,
            "begin_date": 1_429_956_000_000_i64,
        }]))
    );
    assert!(interceptor.seen().is_empty());
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let (client, transport, _) = make_client("http://localhost:5242/");
    transport.respond(200, "");
    let reply = client
        .invoke(
            &TICKETS,
            "delete",
            Params::new().with("event_id", "e1").with("ticket_id", "t1"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(reply, Reply::Data(serde_json::Value::Null));
}

#[tokio::test]
async fn test_error_envelope_resolves_as_failed_reply() {
    let (client, transport, interceptor) = make_client("http://localhost:5242/");
    transport.respond(200, r#"{"error":"database unavailable"}"#);

    let reply = client
        .invoke(&EVENTS, "all", Params::new(), None)
        .await
        .unwrap();
    assert_eq!(reply, Reply::Failed(json!({ "error": "database unavailable" })));
    // Application errors are not transport failures.
    assert!(interceptor.seen().is_empty());
}

#[tokio::test]
async fn test_status_failure_is_intercepted_then_returned() {
    let (client, transport, interceptor) = make_client("http://localhost:5242/");
    transport.respond(404, "not found");

    let err = client
        .invoke(&EVENTS, "get", Params::new().with("id", "nope"), None)
        .await
        .unwrap_err();

    let seen = interceptor.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].status(), Some(404));
    assert_eq!(seen[0].body.as_deref(), Some("not found"));
    assert_eq!(seen[0].url, "http://localhost:5242/events/nope");
    match err {
        ApiError::Request(failure) => assert_eq!(failure, seen[0]),
        other => panic!("unexpected error: {other}"),
    }
}

#[parameterized(
    timeout = { TransportError::Timeout, FailureKind::Timeout },
    refused = {
        TransportError::ConnectionFailed("refused".into()),
        FailureKind::Network("connection failed: refused".into())
    },
)]
fn transport_failures_are_intercepted(err: TransportError, expected: FailureKind) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let (client, transport, interceptor) = make_client("http://localhost:5242/");
        transport.fail(err);

        let result = client.invoke(&USERS, "logout", Params::new(), None).await;
        assert!(matches!(result, Err(ApiError::Request(ref f)) if f.kind == expected));
        assert_eq!(interceptor.seen().len(), 1);
        assert_eq!(interceptor.seen()[0].body, None);
    });
}

#[tokio::test]
async fn test_undecodable_body_is_intercepted() {
    let (client, transport, interceptor) = make_client("http://localhost:5242/");
    transport.respond(200, "<html>proxy error</html>");

    let result = client.invoke(&EVENTS, "all", Params::new(), None).await;
    assert!(matches!(
        result,
        Err(ApiError::Request(ref f)) if matches!(f.kind, FailureKind::Decode(_))
    ));
    assert_eq!(interceptor.seen().len(), 1);
}

#[tokio::test]
async fn test_every_operation_routes_failures_through_interceptor() {
    let (client, transport, interceptor) = make_client("http://localhost:5242/");
    let mut expected = 0;

    for spec in REGISTRY {
        for op in spec.operations {
            transport.respond(500, "boom");
            let result = client.invoke(spec, op.name, Params::new(), None).await;
            expected += 1;
            assert!(
                matches!(result, Err(ApiError::Request(_))),
                "{}.{} did not fail",
                spec.name,
                op.name
            );
            assert_eq!(interceptor.seen().len(), expected);
        }
    }
}

#[tokio::test]
async fn test_every_operation_passes_error_envelopes_through() {
    let (client, transport, _) = make_client("http://localhost:5242/");

    for spec in REGISTRY {
        for op in spec.operations {
            transport.respond(200, r#"{"error":"nope"}"#);
            let reply = client
                .invoke(spec, op.name, Params::new(), None)
                .await
                .unwrap();
            assert_eq!(reply, Reply::Failed(json!({ "error": "nope" })));
        }
    }
}

#[tokio::test]
async fn test_unknown_operation() {
    let (client, transport, interceptor) = make_client("http://localhost:5242/");
    let err = client
        .invoke(&EVENTS, "purge", Params::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnknownOperation { entity: "event", .. }));
    assert!(transport.requests().is_empty());
    assert!(interceptor.seen().is_empty());
}

#[parameterized(
    event_dot = { &EVENTS, "get", Params::new().with("id", ".") },
    event_dot_dot = { &EVENTS, "get", Params::new().with("id", "..") },
    ticket_delete = {
        &TICKETS, "delete", Params::new().with("event_id", "e1").with("ticket_id", "..")
    },
    ticket_event = {
        &TICKETS, "add", Params::new().with("event_id", "..")
    },
)]
fn dot_segment_identifiers_are_rejected(
    spec: &'static ResourceSpec,
    operation: &str,
    params: Params,
) {
    let (client, transport, interceptor) = make_client("https://example.org/eventman/");
    let err = tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(client.invoke(spec, operation, params, None))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl { .. }));
    assert!(err.to_string().contains("is not a valid identifier"));
    assert!(transport.requests().is_empty());
    assert!(interceptor.seen().is_empty());
}

#[tokio::test]
async fn test_dot_segment_from_entity_field_is_rejected() {
    let (client, transport, _) = make_client("https://example.org/eventman/");
    let err = client
        .invoke(&EVENTS, "update", Params::new(), Some(json!({ "_id": ".." })))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl { .. }));
    assert!(transport.requests().is_empty());
}
