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

use crate::constants::*;
use crate::retry::RetryPolicy;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use std::time::Duration;
use xcover_core::utils::Redact;
use xcover_core::{Context, Error, Result};
use xcover_hmac_signature::{AuthConfig, SignatureAlgorithm};

/// Timeout applied to every attempt of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpTimeout {
    /// One value used for both connecting and reading.
    Total(Duration),
    /// Separate connect and read timeouts.
    Split {
        /// Connection setup timeout.
        connect: Duration,
        /// Timeout of the rest of the attempt.
        read: Duration,
    },
}

impl Default for HttpTimeout {
    fn default() -> Self {
        HttpTimeout::Total(DEFAULT_HTTP_TIMEOUT)
    }
}

impl HttpTimeout {
    /// Connection setup timeout.
    pub fn connect(&self) -> Duration {
        match self {
            HttpTimeout::Total(d) => *d,
            HttpTimeout::Split { connect, .. } => *connect,
        }
    }

    /// Read timeout.
    pub fn read(&self) -> Duration {
        match self {
            HttpTimeout::Total(d) => *d,
            HttpTimeout::Split { read, .. } => *read,
        }
    }

    /// Upper bound of one whole attempt, connecting included.
    pub fn attempt(&self) -> Duration {
        match self {
            HttpTimeout::Total(d) => *d,
            HttpTimeout::Split { connect, read } => connect.saturating_add(*read),
        }
    }
}

impl FromStr for HttpTimeout {
    type Err = Error;

    /// Parse `"10"` or `"3.05,27"` (seconds).
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(',') {
            None => Ok(HttpTimeout::Total(parse_seconds(XC_HTTP_TIMEOUT, s)?)),
            Some((connect, read)) => Ok(HttpTimeout::Split {
                connect: parse_seconds(XC_HTTP_TIMEOUT, connect)?,
                read: parse_seconds(XC_HTTP_TIMEOUT, read)?,
            }),
        }
    }
}

/// Config for the XCover partner API client.
///
/// Build it once, hand it to [`crate::Client::new`]; the client never changes it afterwards.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the API, like `https://api.xcover.com/xcover/`.
    pub base_url: Option<String>,
    /// Partner code scoping every path.
    pub partner_code: Option<String>,
    /// Per attempt timeout.
    pub http_timeout: HttpTimeout,
    /// Key identifier used in signatures.
    pub auth_api_key: Option<String>,
    /// Shared secret used in signatures.
    pub auth_api_secret: Option<String>,
    /// Signature algorithm name, `hmac-sha512` when unset.
    pub auth_algorithm: Option<String>,
    /// Space separated header names to sign.
    pub headers: String,
    /// Retries after the first attempt, `0` disables retrying.
    pub retry_total: u32,
    /// Backoff multiplier in seconds.
    pub retry_backoff_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            partner_code: None,
            http_timeout: HttpTimeout::default(),
            auth_api_key: None,
            auth_api_secret: None,
            auth_algorithm: None,
            headers: DEFAULT_SIGNED_HEADERS.to_string(),
            retry_total: 0,
            retry_backoff_factor: 0.0,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("partner_code", &self.partner_code)
            .field("http_timeout", &self.http_timeout)
            .field("auth_api_key", &self.auth_api_key)
            .field("auth_api_secret", &Redact::from(&self.auth_api_secret))
            .field("auth_algorithm", &self.auth_algorithm)
            .field("headers", &self.headers)
            .field("retry_total", &self.retry_total)
            .field("retry_backoff_factor", &self.retry_backoff_factor)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// Unset variables keep their default, malformed numbers are rejected.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let mut cfg = Self {
            base_url: ctx.env_var(XC_BASE_URL),
            partner_code: ctx.env_var(XC_PARTNER_CODE),
            auth_api_key: ctx.env_var(XC_AUTH_API_KEY),
            auth_api_secret: ctx.env_var(XC_AUTH_API_SECRET),
            auth_algorithm: ctx.env_var(XC_AUTH_ALGORITHM),
            ..Default::default()
        };

        if let Some(v) = ctx.env_var(XC_AUTH_HEADERS) {
            cfg.headers = v;
        }
        if let Some(v) = ctx.env_var(XC_HTTP_TIMEOUT) {
            cfg.http_timeout = v.parse()?;
        }
        if let Some(v) = ctx.env_var(XC_RETRY_TOTAL) {
            cfg.retry_total = v.trim().parse().map_err(|e| {
                Error::config_invalid(format!("{XC_RETRY_TOTAL} must be an integer, got {v}"))
                    .with_source(e)
            })?;
        }
        if let Some(v) = ctx.env_var(XC_RETRY_BACKOFF_FACTOR) {
            cfg.retry_backoff_factor = parse_seconds(XC_RETRY_BACKOFF_FACTOR, &v)?.as_secs_f64();
        }

        Ok(cfg)
    }

    /// Derive the signing config.
    ///
    /// Fails on an unsupported algorithm or missing credentials.
    pub fn auth_config(&self) -> Result<AuthConfig> {
        let algorithm = match self.auth_algorithm.as_deref() {
            None | Some("") => SignatureAlgorithm::default(),
            Some(v) => v.parse()?,
        };

        Ok(AuthConfig {
            api_key: required(XC_AUTH_API_KEY, &self.auth_api_key)?.to_string(),
            api_secret: required(XC_AUTH_API_SECRET, &self.auth_api_secret)?.to_string(),
            algorithm,
            headers: self.headers.clone(),
        })
    }

    /// Derive the retry policy.
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        let backoff_factor = Duration::try_from_secs_f64(self.retry_backoff_factor)
            .map_err(|e| {
                Error::config_invalid(format!(
                    "retry_backoff_factor must be a non-negative number of seconds, got {}",
                    self.retry_backoff_factor
                ))
                .with_source(e)
            })?;

        Ok(RetryPolicy {
            total: self.retry_total,
            backoff_factor,
        })
    }

    /// Absolute prefix every partner path is resolved against.
    ///
    /// `https://api.xcover.com/xcover` and `https://api.xcover.com/xcover/` both
    /// resolve to `https://api.xcover.com/xcover/partners/{partner_code}/`.
    pub fn partner_endpoint(&self) -> Result<String> {
        let base_url = required(XC_BASE_URL, &self.base_url)?;
        let partner_code = required(XC_PARTNER_CODE, &self.partner_code)?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::config_invalid(format!(
                "base_url must be an absolute http(s) url, got {base_url}"
            )));
        }

        Ok(format!(
            "{}/partners/{}/",
            base_url.trim_end_matches('/'),
            partner_code.trim_matches('/')
        ))
    }
}

fn required<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config_invalid(format!("{name} is required"))),
    }
}

fn parse_seconds(name: &str, v: &str) -> Result<Duration> {
    v.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            Error::config_invalid(format!(
                "{name} must be a non-negative number of seconds, got {v}"
            ))
        })
}
