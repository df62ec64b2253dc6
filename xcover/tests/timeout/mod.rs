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
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;
use xcover::{CallOptions, Config, ErrorKind, HttpTimeout};

#[tokio::test(start_paused = true)]
async fn test_slow_response_times_out() {
    let mock = MockHttpSend::new(200, "{}").with_delay(Duration::from_secs(3600));
    let client = client(&mock, config());

    let start = Instant::now();
    let err = client
        .get_quote("Q-1", CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(start.elapsed(), Duration::from_secs(10));
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_split_timeout_bounds_whole_attempt() {
    let mock = MockHttpSend::new(200, "{}").with_delay(Duration::from_secs(3600));
    let client = client(
        &mock,
        Config {
            http_timeout: "3.5,27".parse().unwrap(),
            ..config()
        },
    );

    let start = Instant::now();
    let err = client
        .get_booking("BKG-1", CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(start.elapsed(), Duration::from_millis(30_500));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_applies_per_attempt() {
    let mock = MockHttpSend::new(200, "{}").with_delay(Duration::from_secs(3600));
    let client = client(
        &mock,
        Config {
            http_timeout: HttpTimeout::Total(Duration::from_secs(5)),
            retry_total: 1,
            retry_backoff_factor: 1.0,
            ..config()
        },
    );

    let err = client
        .instant_booking(&json!({"quotes": []}), CallOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RetryExhausted);
    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    // 5s timeout of the first attempt, then 1s backoff.
    assert_eq!(requests[1].at - requests[0].at, Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn test_response_within_timeout() {
    let mock = MockHttpSend::new(200, r#"{"id":"Q-1"}"#).with_delay(Duration::from_secs(9));
    let client = client(&mock, config());

    let resp = client
        .get_quote("Q-1", CallOptions::default())
        .await
        .expect("response before the deadline must succeed");

    assert_eq!(resp, json!({"id": "Q-1"}));
}
