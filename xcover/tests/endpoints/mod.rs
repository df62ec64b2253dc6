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
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use xcover::{CallOptions, Payload};

const PREFIX: &str = "/xcover/partners/LLODT/";

#[tokio::test]
async fn test_operation_table() {
    let mock = MockHttpSend::new(200, "{}");
    let client = client(&mock, config());
    let body = json!({"k": "v"});
    let opts = CallOptions::default;

    client.create_quote(&body, opts()).await.unwrap();
    client.get_quote("Q-1", opts()).await.unwrap();
    client.update_quote("Q-1", &body, opts()).await.unwrap();
    client.add_quotes("Q-1", &body, opts()).await.unwrap();
    client.delete_quotes("Q-1", &body, opts()).await.unwrap();
    client.opt_out("Q-1", None, opts()).await.unwrap();
    client.create_booking("Q-1", &body, opts()).await.unwrap();
    client.instant_booking(&body, opts()).await.unwrap();
    client.get_booking("B-1", opts()).await.unwrap();
    client.list_bookings(opts()).await.unwrap();
    client.confirm_booking("B-1", None, opts()).await.unwrap();
    client.trigger_email("B-1", None, opts()).await.unwrap();
    client.booking_modification("B-1", &body, opts()).await.unwrap();
    client
        .booking_modification_quote("B-1", &body, opts())
        .await
        .unwrap();
    client
        .confirm_booking_modification("B-1", "U-1", None, opts())
        .await
        .unwrap();
    client.cancel_booking("B-1", None, opts()).await.unwrap();
    client
        .confirm_booking_cancellation("B-1", "C-1", None, opts())
        .await
        .unwrap();
    client.quote_for_renewal("B-1", &body, opts()).await.unwrap();
    client
        .renewal_confirmation("B-1", "R-1", None, opts())
        .await
        .unwrap();
    client.renewal_opt_out("B-1", None, opts()).await.unwrap();
    client.get_instalments("Q-1", opts()).await.unwrap();
    client
        .update_instalment_payment_status("Q-1", &body, opts())
        .await
        .unwrap();

    let expected = [
        (Method::POST, "quotes/", false),
        (Method::GET, "quotes/Q-1/", false),
        (Method::PATCH, "quotes/Q-1/", true),
        (Method::POST, "quotes/Q-1/add/", true),
        (Method::POST, "quotes/Q-1/delete/", true),
        (Method::POST, "quotes/Q-1/opt_out/", true),
        (Method::POST, "bookings/Q-1", true),
        (Method::POST, "instant_booking/", true),
        (Method::GET, "bookings/B-1", false),
        (Method::GET, "bookings/", false),
        (Method::POST, "bookings/B-1/confirm/", true),
        (Method::POST, "bookings/B-1/send_event/", true),
        (Method::PATCH, "bookings/B-1", true),
        (Method::PATCH, "bookings/B-1/quote_for_update/", true),
        (Method::POST, "bookings/B-1/confirm_update/U-1/", true),
        (Method::POST, "bookings/B-1/cancel", true),
        (Method::POST, "bookings/B-1/confirm_cancellation/C-1/", true),
        (Method::POST, "bookings/B-1/quote_for_renewal/", true),
        (Method::POST, "bookings/B-1/confirm_renewal/R-1/", true),
        (Method::POST, "bookings/B-1/renewal_opt_out/", true),
        (Method::GET, "instalments/Q-1/", false),
        (Method::PATCH, "instalments/Q-1/", true),
    ];

    let requests = mock.requests();
    assert_eq!(requests.len(), expected.len());
    for (req, (method, path, idempotent)) in requests.iter().zip(expected) {
        assert_eq!(req.method, method, "{path}");
        assert_eq!(req.uri.path(), format!("{PREFIX}{path}"));
        assert_eq!(
            req.header("x-idempotency-key").is_some(),
            idempotent,
            "{method} {path}"
        );
    }
}

#[tokio::test]
async fn test_optional_payload() {
    let mock = MockHttpSend::new(200, "{}");
    let client = client(&mock, config());

    client
        .confirm_booking("B-1", None, CallOptions::default())
        .await
        .unwrap();
    assert!(mock.last_request().body.is_empty());

    let payload: Payload = [("security_token", "tok")].into_iter().collect();
    client
        .confirm_booking("B-1", Some(&payload), CallOptions::default())
        .await
        .unwrap();
    assert_eq!(
        mock.last_request().body.as_ref(),
        br#"{"security_token":"tok"}"#
    );
}

#[tokio::test]
async fn test_ids_are_escaped() {
    let mock = MockHttpSend::new(200, "{}");
    let client = client(&mock, config());

    client
        .get_booking("a b/c?d", CallOptions::default())
        .await
        .unwrap();

    let req = mock.last_request();
    assert_eq!(req.uri.path(), format!("{PREFIX}bookings/a%20b%2Fc%3Fd"));
    assert_eq!(req.uri.query(), None);
}

#[tokio::test]
async fn test_list_bookings_params() {
    let mock = MockHttpSend::new(200, r#"{"count":0,"results":[]}"#);
    let client = client(&mock, config());

    let resp = client
        .list_bookings(
            CallOptions::default()
                .with_param("limit", "10")
                .with_param("offset", "20"),
        )
        .await
        .unwrap();

    assert_eq!(resp, json!({"count": 0, "results": []}));
    assert_eq!(mock.last_request().uri.query(), Some("limit=10&offset=20"));
}
