// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::mock::{client, config, MockHttpSend};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use xcover::{build_string_to_sign, CallOptions, ErrorKind, Payload, RequestSigner};

const BOOKING: &str = r#"{"id":"BKG-1","status":"CONFIRMED"}"#;

#[tokio::test]
async fn test_default_headers() {
    let mock = MockHttpSend::new(201, BOOKING);
    let client = client(&mock, config());

    let payload = Payload::from(json!({"quotes": [{"id": "Q-1"}]}));
    let resp = client
        .instant_booking(
            &payload,
            CallOptions::default().with_header(
                HeaderName::from_static("x-custom"),
                HeaderValue::from_static("1"),
            ),
        )
        .await
        .expect("instant booking must succeed");
    assert_eq!(resp, json!({"id": "BKG-1", "status": "CONFIRMED"}));

    let req = mock.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(
        req.uri.to_string(),
        "https://api.xcover.com/xcover/partners/LLODT/instant_booking/"
    );
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("x-custom"), Some("1"));
    assert_eq!(req.header("date"), Some("Tue, 08 Apr 2025 12:00:00 GMT"));
    assert!(req
        .header("authorization")
        .expect("authorization must be set")
        .starts_with(
            r#"Signature keyId="test_api_key",algorithm="hmac-sha512",headers="(request-target) date",signature=""#
        ));
    assert!(!req.header("x-idempotency-key").unwrap_or_default().is_empty());
    assert_eq!(req.body.as_ref(), br#"{"quotes":[{"id":"Q-1"}]}"#);
}

#[tokio::test]
async fn test_caller_headers_win() {
    let mock = MockHttpSend::new(200, BOOKING);
    let client = client(&mock, config());

    client
        .booking_modification(
            "BKG-1",
            &json!({"travellers": []}),
            CallOptions::default().with_header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/merge-patch+json"),
            ),
        )
        .await
        .expect("modification must succeed");

    let req = mock.last_request();
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(
        req.header("content-type"),
        Some("application/merge-patch+json")
    );
    assert_eq!(req.headers.get_all(CONTENT_TYPE).iter().count(), 1);
}

#[tokio::test]
async fn test_idempotency_key_is_passed_through() {
    let mock = MockHttpSend::new(200, BOOKING);
    let client = client(&mock, config());

    client
        .cancel_booking(
            "BKG-1",
            None,
            CallOptions::default().with_header(
                HeaderName::from_static("x-idempotency-key"),
                HeaderValue::from_static("key-123"),
            ),
        )
        .await
        .expect("cancel must succeed");

    let req = mock.last_request();
    assert_eq!(req.header("x-idempotency-key"), Some("key-123"));
    assert_eq!(req.headers.get_all("x-idempotency-key").iter().count(), 1);
}

#[tokio::test]
async fn test_idempotency_keys_are_unique() {
    let mock = MockHttpSend::new(200, BOOKING);
    let client = client(&mock, config());

    for _ in 0..2 {
        client
            .confirm_booking("BKG-1", None, CallOptions::default())
            .await
            .expect("confirm must succeed");
    }

    let keys: Vec<_> = mock
        .requests()
        .iter()
        .map(|r| r.header("x-idempotency-key").map(str::to_string))
        .collect();
    assert_eq!(keys.len(), 2);
    assert!(keys[0].is_some());
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn test_create_quote_idempotency() {
    for (enabled, expected) in [(None, false), (Some(false), false), (Some(true), true)] {
        let mock = MockHttpSend::new(201, r#"{"id":"Q-1"}"#);
        let client = client(&mock, config());

        let options = CallOptions {
            idempotency_key: enabled,
            ..Default::default()
        };
        client
            .create_quote(&json!({"currency": "AUD"}), options)
            .await
            .expect("create quote must succeed");

        let req = mock.last_request();
        assert_eq!(req.header("x-idempotency-key").is_some(), expected, "{enabled:?}");
    }
}

#[tokio::test]
async fn test_reads_have_no_idempotency_key() {
    let mock = MockHttpSend::new(200, r#"{"id":"Q-1"}"#);
    let client = client(&mock, config());

    client
        .get_quote("Q-1", CallOptions::default())
        .await
        .expect("get quote must succeed");

    let req = mock.last_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.header("x-idempotency-key"), None);
    assert!(req.body.is_empty());
}

#[tokio::test]
async fn test_signature_ignores_query() {
    let mock = MockHttpSend::new(200, "[]");
    let client = client(&mock, config());

    let resp = client
        .request(
            Method::GET,
            "quotes/",
            None::<&Payload>,
            CallOptions::default().with_param("limit", "1"),
        )
        .await
        .expect("request must succeed");
    assert_eq!(resp, json!([]));

    let req = mock.last_request();
    assert_eq!(req.uri.query(), Some("limit=1"));

    let auth = req.header("authorization").expect("authorization must be set");
    assert!(
        auth.ends_with(r#"signature="eD6b5I58bBp3G57ex0PRwCcoY7VlOM6%2BHxMkxZQg3aimf7AJJW9wi6CXkhNrLxOy4iXQ5Q8wIlWwGnmM03bWiQ%3D%3D""#),
        "{auth}"
    );

    let string_to_sign =
        build_string_to_sign(&["(request-target)", "date"], &req.method, req.uri.path(), &req.headers)
            .expect("string to sign must build");
    assert_eq!(
        string_to_sign,
        "(request-target): get /xcover/partners/LLODT/quotes/\ndate: Tue, 08 Apr 2025 12:00:00 GMT"
    );
}

#[tokio::test]
async fn test_authorization_verifies() {
    let mock = MockHttpSend::new(200, BOOKING);
    let cfg = config();
    let client = client(&mock, cfg.clone());

    client
        .trigger_email(
            "BKG-1",
            Some(&Payload::from_iter([("event", "BOOKING_CONFIRMED")])),
            CallOptions::default(),
        )
        .await
        .expect("trigger email must succeed");

    let req = mock.last_request();
    assert_eq!(req.body.as_ref(), br#"{"event":"BOOKING_CONFIRMED"}"#);

    // Recompute on the server side: the date is taken from the request.
    let (mut parts, _) = http::Request::new(()).into_parts();
    parts.method = req.method.clone();
    parts.uri = req.uri.clone();
    parts.headers = req.headers.clone();
    parts.headers.remove(AUTHORIZATION);

    let signer = RequestSigner::new(cfg.auth_config().expect("auth config must be valid"));
    let expected = signer.sign(&parts).expect("sign must succeed");

    assert_eq!(expected.get("date"), None);
    assert_eq!(expected.get(AUTHORIZATION), req.headers.get(AUTHORIZATION));
}

#[tokio::test]
async fn test_error_status() {
    for status in [400, 404, 422, 500] {
        let mock = MockHttpSend::new(status, r#"{"detail":"invalid"}"#);
        let client = client(&mock, config());

        let err = client
            .update_quote("Q-1", &json!({"quantity": 0}), CallOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert!(err.is_http_error());
        assert_eq!(err.status(), StatusCode::from_u16(status).ok());
        assert_eq!(
            err.url(),
            Some("https://api.xcover.com/xcover/partners/LLODT/quotes/Q-1/")
        );
        assert_eq!(mock.requests().len(), 1);
    }
}

#[tokio::test]
async fn test_empty_success() {
    for status in [202, 204] {
        let mock = MockHttpSend::new(status, "");
        let client = client(&mock, config());

        let resp = client
            .renewal_opt_out("BKG-1", None, CallOptions::default())
            .await
            .expect("opt out must succeed");

        assert_eq!(resp, Value::Bool(true), "{status}");
    }
}

#[tokio::test]
async fn test_call_returns_raw_response() {
    let mock = MockHttpSend::new(500, "boom");
    let client = client(&mock, config());

    let resp = client
        .call(Method::DELETE, "quotes/Q-1/", None::<&Payload>, CallOptions::default())
        .await
        .expect("call must return the response");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body().as_ref(), b"boom");
    assert_eq!(mock.last_request().header("x-idempotency-key"), None);
}

#[tokio::test]
async fn test_encode_error_sends_nothing() {
    let mock = MockHttpSend::new(200, BOOKING);
    let client = client(&mock, config());

    let mut payload = BTreeMap::new();
    payload.insert(vec![1u8], "keys must be strings");

    let err = client
        .add_quotes("Q-1", &payload, CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EncodeInvalid);
    assert!(mock.requests().is_empty());
}
