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
use log::debug;
use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;
use xcover_core::{Error, HttpSend, Result};

/// HttpSend decorator bounding every attempt by a deadline.
///
/// An attempt running past it fails with
/// [`ErrorKind::Unexpected`](xcover_core::ErrorKind::Unexpected), which the
/// retrying sender treats like any other transport error.
pub struct TimeoutHttpSend {
    inner: Arc<dyn HttpSend>,
    timeout: Duration,
}

impl TimeoutHttpSend {
    /// Wrap `inner`, giving each request at most `timeout`.
    pub fn new(inner: Arc<dyn HttpSend>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl Debug for TimeoutHttpSend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutHttpSend")
            .field("inner", &self.inner)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl HttpSend for TimeoutHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let url = req.uri().to_string();

        match tokio::time::timeout(self.timeout, self.inner.http_send(req)).await {
            Ok(resp) => resp,
            Err(elapsed) => {
                debug!("{url} did not answer within {:?}", self.timeout);
                Err(Error::unexpected(format!(
                    "http request to {url} timed out after {:?}",
                    self.timeout
                ))
                .with_source(elapsed))
            }
        }
    }
}
