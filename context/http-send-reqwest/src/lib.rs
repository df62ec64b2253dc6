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

//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Timeouts are enforced per attempt: every call to
//! [`HttpSend::http_send`] gets the full connect and read budget.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use std::time::Duration;
use xcover_core::{Error, HttpSend, Result};

/// HttpSend over a `reqwest::Client`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new ReqwestHttpSend whose client applies the given timeouts.
    ///
    /// `connect` bounds connection setup, `read` bounds the whole attempt.
    pub fn with_timeouts(connect: Duration, read: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect)
            .timeout(read)
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to build reqwest request").with_source(e))?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(send_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(send_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn send_error(err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        "http request timed out"
    } else if err.is_connect() {
        "failed to connect"
    } else {
        "failed to send http request"
    };
    Error::unexpected(message).with_source(err)
}
