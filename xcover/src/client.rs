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

use crate::config::Config;
use crate::constants::{APPLICATION_JSON, X_IDEMPOTENCY_KEY};
use crate::encoder::encode;
use crate::operation::Operation;
use crate::retry::{RetryHttpSend, RetryPolicy};
use crate::timeout::TimeoutHttpSend;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Debug};
use std::sync::Arc;
use uuid::Uuid;
use xcover_core::{Context, Error, HttpSend, Result};
use xcover_hmac_signature::RequestSigner;

/// Per call overrides.
///
/// Unset switches fall back to the defaults of the operation.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Query parameters, form-urlencoded into the url.
    pub params: Vec<(String, String)>,
    /// Extra headers, they win over the client defaults.
    pub headers: HeaderMap,
    /// Inject an `x-idempotency-key` when the caller did not set one.
    pub idempotency_key: Option<bool>,
    /// Retry transient failures with the configured policy.
    pub auto_retry: Option<bool>,
}

impl CallOptions {
    /// Append a query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Set a header, replacing any previous value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override idempotency key injection.
    pub fn with_idempotency_key(mut self, enabled: bool) -> Self {
        self.idempotency_key = Some(enabled);
        self
    }

    /// Override auto-retry.
    pub fn with_auto_retry(mut self, enabled: bool) -> Self {
        self.auto_retry = Some(enabled);
        self
    }
}

/// Client of the XCover partner API.
///
/// Cloning is cheap, clones share the same immutable config.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    ctx: Context,
    config: Config,
    signer: RequestSigner,
    endpoint: String,
    retry: RetryPolicy,
}

impl Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("ctx", &self.inner.ctx)
            .field("config", &self.inner.config)
            .field("endpoint", &self.inner.endpoint)
            .finish()
    }
}

impl Client {
    /// Create a client sending through `ctx`.
    ///
    /// The config is validated here: an unsupported algorithm, missing
    /// credentials, base url or partner code fail with
    /// [`ErrorKind::ConfigInvalid`](xcover_core::ErrorKind::ConfigInvalid).
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let signer = RequestSigner::new(config.auth_config()?);
        let endpoint = config.partner_endpoint()?;
        let retry = config.retry_policy()?;

        Ok(Self {
            inner: Arc::new(Inner {
                ctx,
                config,
                signer,
                endpoint,
                retry,
            }),
        })
    }

    /// Replace the signer, used to pin the signing time.
    pub fn with_signer(self, signer: RequestSigner) -> Self {
        let inner = &self.inner;
        Self {
            inner: Arc::new(Inner {
                ctx: inner.ctx.clone(),
                config: inner.config.clone(),
                signer,
                endpoint: inner.endpoint.clone(),
                retry: inner.retry,
            }),
        }
    }

    /// Config the client was built with.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Absolute url of a path relative to the partner prefix.
    pub fn url(&self, path: &str, params: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.inner.endpoint, path.trim_start_matches('/'));
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }
        url
    }

    /// Sign and send a request, returning the raw response.
    ///
    /// Idempotency key injection and auto-retry are off unless enabled in
    /// `options`. The response status is not checked.
    pub async fn call<P>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&P>,
        options: CallOptions,
    ) -> Result<http::Response<Bytes>>
    where
        P: Serialize + ?Sized,
    {
        let (_, resp) = self.send(method, path, payload, options, false, false).await?;
        Ok(resp)
    }

    /// Sign and send a request, then classify the response.
    ///
    /// - 4xx and 5xx fail with [`ErrorKind::HttpStatus`](xcover_core::ErrorKind::HttpStatus)
    /// - 202 and 204 return `true`
    /// - other statuses return the parsed JSON body
    pub async fn request<P>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&P>,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let (url, resp) = self.send(method, path, payload, options, false, false).await?;
        classify(&url, resp)
    }

    /// Run an operation with its own defaults.
    pub(crate) async fn dispatch<P>(
        &self,
        op: Operation,
        path: &str,
        payload: Option<&P>,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        debug!("dispatching {op}");
        let (url, resp) = self
            .send(
                op.method(),
                path,
                payload,
                options,
                op.idempotency_key(),
                op.auto_retry(),
            )
            .await?;
        classify(&url, resp)
    }

    async fn send<P>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&P>,
        options: CallOptions,
        idempotency_key: bool,
        auto_retry: bool,
    ) -> Result<(String, http::Response<Bytes>)>
    where
        P: Serialize + ?Sized,
    {
        let body = match payload {
            Some(payload) => encode(payload)?,
            None => Bytes::new(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.extend(options.headers);

        let idempotency_header = HeaderName::from_static(X_IDEMPOTENCY_KEY);
        if options.idempotency_key.unwrap_or(idempotency_key)
            && !headers.contains_key(&idempotency_header)
        {
            let key = Uuid::new_v4().hyphenated().to_string();
            headers.insert(idempotency_header, HeaderValue::from_str(&key)?);
        }

        let url = self.url(path, &options.params);
        debug!("{method} {url}");

        let (mut parts, body) = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body)
            .map_err(|e| Error::request_invalid(format!("invalid request to {url}")).with_source(e))?
            .into_parts();
        parts.headers = headers;

        let signed = self.inner.signer.sign(&parts)?;
        parts.headers.extend(signed);
        let req = http::Request::from_parts(parts, body);

        let sender: Arc<dyn HttpSend> = Arc::new(TimeoutHttpSend::new(
            self.inner.ctx.http_sender(),
            self.inner.config.http_timeout.attempt(),
        ));
        let resp = if options.auto_retry.unwrap_or(auto_retry) && self.inner.retry.is_enabled() {
            RetryHttpSend::new(sender, self.inner.retry)
                .http_send(req)
                .await?
        } else {
            sender.http_send(req).await?
        };

        Ok((url, resp))
    }
}

fn classify(url: &str, resp: http::Response<Bytes>) -> Result<Value> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        debug!(
            "{url} answered {status}: {}",
            String::from_utf8_lossy(resp.body())
        );
        return Err(Error::http_status(status, url));
    }

    if status == StatusCode::ACCEPTED || status == StatusCode::NO_CONTENT {
        return Ok(Value::Bool(true));
    }

    serde_json::from_slice(resp.body()).map_err(|e| {
        Error::unexpected(format!("{url} answered {status} without a json body")).with_source(e)
    })
}
