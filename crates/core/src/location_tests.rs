// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    plain = { "http://localhost:5242/events/42", "ws://localhost:5242/ws/events/42/updates" },
    secure = { "https://example.org/events/42", "wss://example.org:443/ws/events/42/updates" },
    default_http_port = { "http://example.org/events/7", "ws://example.org:80/ws/events/7/updates" },
    trailing_slash = { "http://h:8080/events/42/", "ws://h:8080/ws/events/42/updates" },
    root = { "http://h:8080/", "ws://h:8080/ws/updates" },
    query_ignored = { "http://h:8080/events/42?tab=persons", "ws://h:8080/ws/events/42/updates" },
)]
fn updates_url_follows_page(page: &str, expected: &str) {
    let location = PageLocation::parse(page).unwrap();
    assert_eq!(location.updates_url(), expected);
}

#[parameterized(
    ftp = { "ftp://example.org/events/1" },
    not_a_url = { "events/1" },
    file = { "file:///tmp/events" },
)]
fn parse_rejects_non_http_locations(page: &str) {
    let err = PageLocation::parse(page).unwrap_err();
    assert!(matches!(err, Error::InvalidLocation { .. }));
}

#[test]
fn stream_scheme_matches_security() {
    assert_eq!(PageLocation::new(true, "h", 443, "/").stream_scheme(), "wss");
    assert_eq!(PageLocation::new(false, "h", 80, "/").stream_scheme(), "ws");
}

#[test]
fn explicit_port_is_kept() {
    let location: PageLocation = "https://example.org:8443/events/2".parse().unwrap();
    assert!(location.is_secure());
    assert_eq!(location.host(), "example.org");
    assert_eq!(location.port(), 8443);
    assert_eq!(location.path(), "/events/2");
    assert_eq!(location.updates_url(), "wss://example.org:8443/ws/events/2/updates");
}

#[test]
fn display_includes_explicit_port() {
    let location = PageLocation::parse("http://localhost/events/1").unwrap();
    assert_eq!(location.to_string(), "http://localhost:80/events/1");
}
