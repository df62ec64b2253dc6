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

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use http::{HeaderMap, Method, StatusCode, Uri};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use xcover::{Client, Config, Context, HttpSend, RequestSigner, Result};

/// A request seen by [`MockHttpSend`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub at: Instant,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug)]
struct State {
    queue: VecDeque<(StatusCode, Bytes)>,
    fallback: (StatusCode, Bytes),
    delay: Duration,
    requests: Vec<Recorded>,
}

/// HttpSend that records requests and answers from a script.
///
/// Scripted responses are used in order, then the fallback forever.
#[derive(Debug, Clone)]
pub struct MockHttpSend {
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                queue: VecDeque::new(),
                fallback: (status_code(status), Bytes::from_static(body.as_bytes())),
                delay: Duration::ZERO,
                requests: Vec::new(),
            })),
        }
    }

    pub fn then(self, status: u16, body: &'static str) -> Self {
        self.state
            .lock()
            .unwrap()
            .queue
            .push_back((status_code(status), Bytes::from_static(body.as_bytes())));
        self
    }

    /// Take `delay` before answering each request.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request was sent")
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("status must be valid")
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (status, body, delay) = {
            let mut state = self.state.lock().unwrap();

            let (parts, body) = req.into_parts();
            state.requests.push(Recorded {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
                at: Instant::now(),
            });

            let next = state.queue.pop_front();
            let (status, body) = next.unwrap_or_else(|| state.fallback.clone());
            (status, body, state.delay)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Ok(http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .expect("response must be valid"))
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config() -> Config {
    Config {
        base_url: Some("https://api.xcover.com/xcover/".to_string()),
        partner_code: Some("LLODT".to_string()),
        auth_api_key: Some("test_api_key".to_string()),
        auth_api_secret: Some("test_api_secret".to_string()),
        ..Default::default()
    }
}

/// Build a client sending through `mock`, signing at a fixed time.
pub fn client(mock: &MockHttpSend, config: Config) -> Client {
    init_logger();

    let auth = config.auth_config().expect("auth config must be valid");
    let signer = RequestSigner::new(auth).with_time(
        Utc.with_ymd_and_hms(2025, 4, 8, 12, 0, 0)
            .single()
            .expect("time must be valid"),
    );

    Client::new(Context::new().with_http_send(mock.clone()), config)
        .expect("client must be valid")
        .with_signer(signer)
}
