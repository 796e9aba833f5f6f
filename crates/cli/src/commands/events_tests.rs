// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::cli::FieldArgs;
use crate::commands::testing::TestContext;
use crate::error::Error;
use serde_json::json;

fn fields(fields: &[&str]) -> FieldArgs {
    FieldArgs {
        fields: fields.iter().map(|s| s.to_string()).collect(),
        json: None,
    }
}

#[tokio::test]
async fn test_list() {
    let ctx = TestContext::new();
    ctx.respond(200, r#"{"events":[{"_id":"e1","title":"Linux Day"}]}"#);

    let reply = run(&ctx.api, EventsCommand::List).await.unwrap();
    assert_eq!(ctx.request_line(), "GET /events");
    assert_eq!(reply, Reply::Data(json!([{ "_id": "e1", "title": "Linux Day" }])));
}

#[tokio::test]
async fn test_show() {
    let ctx = TestContext::new();
    run(&ctx.api, EventsCommand::Show { id: "e1".into() })
        .await
        .unwrap();
    assert_eq!(ctx.request_line(), "GET /events/e1");
}

#[tokio::test]
async fn test_update_sends_fields_with_id() {
    let ctx = TestContext::new();
    let command = EventsCommand::Update {
        id: "e1".into(),
        fields: fields(&["title=Linux Day", "begin-date=2015-04-25"]),
    };
    run(&ctx.api, command).await.unwrap();

    let request = ctx.last_request();
    assert_eq!(ctx.request_line(), "PUT /events/e1");
    assert_eq!(
        request.body,
        Some(json!({
            "_id": "e1",
            "title": "Linux Day",
            "begin-date": 1_429_920_000_000_i64,
        }))
    );
}

#[tokio::test]
async fn test_update_rejects_bad_date_before_sending() {
    let ctx = TestContext::new();
    let command = EventsCommand::Update {
        id: "e1".into(),
        fields: fields(&["end-date=whenever"]),
    };
    let err = run(&ctx.api, command).await.unwrap_err();
    assert!(matches!(err, Error::Core(em_core::Error::InvalidDate(_))));
    assert!(ctx.transport.requests().is_empty());
}

#[tokio::test]
async fn test_persons() {
    let ctx = TestContext::new();
    ctx.respond(200, r#"{"persons":[{"name":"Ann","phone":""}]}"#);
    let reply = run(&ctx.api, EventsCommand::Persons { id: "e1".into() })
        .await
        .unwrap();
    assert_eq!(ctx.request_line(), "GET /events/e1/group_persons");
    assert_eq!(reply, Reply::Data(json!([{ "name": "Ann", "phone": "" }])));
}

#[tokio::test]
async fn test_http_failure_is_api_error() {
    let ctx = TestContext::new();
    ctx.respond(500, "boom");
    let err = run(&ctx.api, EventsCommand::List).await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));
    assert_eq!(ctx.interceptor.seen().len(), 1);
}
