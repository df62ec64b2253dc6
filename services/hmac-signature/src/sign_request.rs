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

use crate::constants::{REQUEST_TARGET, SIGNATURE_ENCODE_SET};
use crate::AuthConfig;
use http::header::{HeaderName, AUTHORIZATION, DATE};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;
use xcover_core::hash::base64_encode;
use xcover_core::time::{format_http_date, now, DateTime};
use xcover_core::Result;

/// RequestSigner computes the `Signature` authorization of a request.
///
/// Signing is pure: [`RequestSigner::sign`] returns the headers to add and
/// leaves the request untouched.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    config: AuthConfig,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given auth config.
    pub fn new(config: AuthConfig) -> Self {
        Self { config, time: None }
    }

    /// Specify the time used for a synthesized `date` header.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Auth config used by this signer.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Compute the headers that authenticate `req`.
    ///
    /// The result always holds `authorization`. It also holds `date` when the
    /// request carries none (or an empty one); that synthesized value is the one
    /// covered by the signature. A `date` already set on the request is signed
    /// verbatim and never replaced.
    pub fn sign(&self, req: &Parts) -> Result<HeaderMap> {
        let mut signed = HeaderMap::new();

        let has_date = req.headers.get(DATE).is_some_and(|v| !v.is_empty());
        if !has_date {
            let now = self.time.unwrap_or_else(now);
            signed.insert(DATE, format_http_date(now).parse()?);
        }

        let string_to_sign = {
            let mut headers = req.headers.clone();
            headers.extend(signed.clone());

            build_string_to_sign(
                &self.config.headers_list(),
                &req.method,
                req.uri.path(),
                &headers,
            )?
        };
        debug!("string to sign: {string_to_sign}");

        let signature = self
            .config
            .algorithm
            .hmac(self.config.api_secret.as_bytes(), string_to_sign.as_bytes());
        let encoded_signature =
            utf8_percent_encode(&base64_encode(&signature), &SIGNATURE_ENCODE_SET).to_string();

        let mut auth_value = String::new();
        write!(auth_value, "Signature keyId=\"{}\",", self.config.api_key)?;
        write!(auth_value, "algorithm=\"{}\",", self.config.algorithm)?;
        write!(auth_value, "headers=\"{}\",", self.config.headers)?;
        write!(auth_value, "signature=\"{}\"", encoded_signature)?;

        signed.insert(AUTHORIZATION, {
            let mut value: HeaderValue = auth_value.parse()?;
            value.set_sensitive(true);
            value
        });

        Ok(signed)
    }
}

/// Build the canonical string covered by the signature.
///
/// One line per configured header, in configured order, joined by `\n`:
///
/// - `(request-target)` renders as `(request-target): {lowercase method} {path}`.
///   `path` must not contain the query string.
/// - Other names render as `{name}: {value}`, looked up case-insensitively.
///
/// Headers absent from the request are skipped without leaving an empty line.
/// A name that can't be a header name, or a value that isn't visible ASCII,
/// is treated as absent.
pub fn build_string_to_sign(
    names: &[&str],
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<String> {
    let mut lines = Vec::with_capacity(names.len());

    for name in names {
        if *name == REQUEST_TARGET {
            lines.push(format!(
                "{REQUEST_TARGET}: {} {path}",
                method.as_str().to_lowercase()
            ));
            continue;
        }

        let Ok(header) = HeaderName::from_bytes(name.as_bytes()) else {
            debug!("header {name} is not a valid header name, skipped");
            continue;
        };
        let Some(value) = headers.get(&header) else {
            debug!("header {name} not found in request, skipped");
            continue;
        };

        let Ok(value) = value.to_str() else {
            debug!("header {name} is not visible ascii, skipped");
            continue;
        };

        lines.push(format!("{name}: {value}"));
    }

    Ok(lines.join("\n"))
}
