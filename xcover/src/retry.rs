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

//! Retrying transport.
//!
//! [`RetryHttpSend`] decorates any [`HttpSend`] and replays a request while
//! the server answers with a transient status:
//!
//! - **429, 502, 503, 504**: retried, waiting for `Retry-After` when the server sent one,
//!   otherwise `backoff_factor * 2^(n-1)` before the n-th retry
//! - **Transport errors**: retried with the same backoff
//! - **Anything else**: returned as is
//!
//! When the budget is spent the call fails with
//! [`ErrorKind::RetryExhausted`](xcover_core::ErrorKind::RetryExhausted),
//! wrapping the last failure.

use crate::constants::BACKOFF_MAX;
use async_trait::async_trait;
use bytes::Bytes;
use http::header::RETRY_AFTER;
use http::{Method, StatusCode};
use log::{debug, warn};
use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;
use xcover_core::time::{now, parse_http_date};
use xcover_core::{Error, ErrorKind, HttpSend, Result};

/// Statuses worth another attempt.
pub const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Retry budget and backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub total: u32,
    /// Delay before the first retry, doubled for every following one.
    pub backoff_factor: Duration,
}

impl RetryPolicy {
    /// A policy without retries disables the decorator.
    pub fn is_enabled(&self) -> bool {
        self.total > 0
    }

    /// Delay before the `retry`-th retry (1-based), capped at two minutes.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(31);
        self.backoff_factor
            .saturating_mul(1u32 << exp)
            .min(BACKOFF_MAX)
    }
}

/// Check whether requests with this method may be replayed.
pub fn is_retryable_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// HttpSend decorator that retries transient failures.
pub struct RetryHttpSend {
    inner: Arc<dyn HttpSend>,
    policy: RetryPolicy,
}

impl RetryHttpSend {
    /// Wrap `inner` with the given policy.
    pub fn new(inner: Arc<dyn HttpSend>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl Debug for RetryHttpSend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryHttpSend")
            .field("inner", &self.inner)
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl HttpSend for RetryHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        if !is_retryable_method(req.method()) {
            return self.inner.http_send(req).await;
        }

        let url = req.uri().to_string();
        let mut retries = 0;

        loop {
            let (failure, wait) = match self.inner.http_send(replay(&req)).await {
                Ok(resp) if RETRY_STATUSES.contains(&resp.status()) => (
                    Error::http_status(resp.status(), url.as_str()),
                    retry_after(&resp),
                ),
                Ok(resp) => return Ok(resp),
                Err(err) if err.kind() == ErrorKind::Unexpected => (err, None),
                Err(err) => return Err(err),
            };

            if retries >= self.policy.total {
                warn!(
                    "giving up on {} {url} after {} attempts: {failure}",
                    req.method(),
                    retries + 1
                );
                return Err(Error::retry_exhausted(url, failure));
            }

            retries += 1;
            let delay = wait.unwrap_or_else(|| self.policy.backoff(retries));
            debug!(
                "retry {retries}/{} of {} {url} in {delay:?}: {failure}",
                self.policy.total,
                req.method()
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Rebuild a request for another attempt.
///
/// Extensions are not carried over.
fn replay(req: &http::Request<Bytes>) -> http::Request<Bytes> {
    let mut attempt = http::Request::new(req.body().clone());
    *attempt.method_mut() = req.method().clone();
    *attempt.uri_mut() = req.uri().clone();
    *attempt.version_mut() = req.version();
    *attempt.headers_mut() = req.headers().clone();
    attempt
}

/// Parse `Retry-After` as delta-seconds or http date.
fn retry_after(resp: &http::Response<Bytes>) -> Option<Duration> {
    let value = resp.headers().get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let at = parse_http_date(value).ok()?;
    Some((at - now()).to_std().unwrap_or(Duration::ZERO))
}
