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

use crate::constants::DEFAULT_SIGNED_HEADERS;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use xcover_core::hash::{hmac_sha256, hmac_sha384, hmac_sha512};
use xcover_core::utils::Redact;
use xcover_core::Error;

/// HMAC hash functions supported by the partner API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureAlgorithm {
    /// `hmac-sha256`
    HmacSha256,
    /// `hmac-sha384`
    HmacSha384,
    /// `hmac-sha512`
    #[default]
    HmacSha512,
}

impl SignatureAlgorithm {
    /// Name used in the `algorithm` parameter of the authorization header.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::HmacSha256 => "hmac-sha256",
            SignatureAlgorithm::HmacSha384 => "hmac-sha384",
            SignatureAlgorithm::HmacSha512 => "hmac-sha512",
        }
    }

    /// Compute the raw HMAC of `content` keyed by `key`.
    pub fn hmac(&self, key: &[u8], content: &[u8]) -> Vec<u8> {
        match self {
            SignatureAlgorithm::HmacSha256 => hmac_sha256(key, content),
            SignatureAlgorithm::HmacSha384 => hmac_sha384(key, content),
            SignatureAlgorithm::HmacSha512 => hmac_sha512(key, content),
        }
    }
}

impl Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hmac-sha256" => Ok(SignatureAlgorithm::HmacSha256),
            "hmac-sha384" => Ok(SignatureAlgorithm::HmacSha384),
            "hmac-sha512" => Ok(SignatureAlgorithm::HmacSha512),
            v => Err(Error::config_invalid(format!(
                "unsupported signature algorithm: {v}, expected one of hmac-sha256, hmac-sha384, hmac-sha512"
            ))),
        }
    }
}

/// Credentials and signing settings.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Key identifier sent as `keyId`.
    pub api_key: String,
    /// Shared secret used as the HMAC key.
    pub api_secret: String,
    /// Hash function of the HMAC.
    pub algorithm: SignatureAlgorithm,
    /// Space separated, ordered names of the headers to sign.
    ///
    /// May contain the `(request-target)` pseudo header.
    pub headers: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            algorithm: SignatureAlgorithm::default(),
            headers: DEFAULT_SIGNED_HEADERS.to_string(),
        }
    }
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &Redact::from(&self.api_secret))
            .field("algorithm", &self.algorithm)
            .field("headers", &self.headers)
            .finish()
    }
}

impl AuthConfig {
    /// Configured header names in order, empty entries dropped.
    pub fn headers_list(&self) -> Vec<&str> {
        self.headers.split(' ').filter(|v| !v.is_empty()).collect()
    }
}
