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

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for xcover operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    url: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (unsupported algorithm, missing fields, invalid values)
    ConfigInvalid,

    /// Payload cannot be encoded as a JSON body
    EncodeInvalid,

    /// Request cannot be built or signed
    RequestInvalid,

    /// The server answered with a 4xx or 5xx status
    HttpStatus,

    /// The retry budget was consumed without a terminal response
    RetryExhausted,

    /// Unexpected errors (network, I/O, malformed responses, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            url: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of the response that caused this error.
    ///
    /// Retry exhaustion reports the status of the last attempt, if it got one.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Canonical reason phrase of [`Error::status`].
    pub fn reason(&self) -> Option<&'static str> {
        self.status.and_then(|s| s.canonical_reason())
    }

    /// URL of the request that caused this error.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Check if this error came out of the HTTP exchange, including retry exhaustion.
    pub fn is_http_error(&self) -> bool {
        matches!(self.kind, ErrorKind::HttpStatus | ErrorKind::RetryExhausted)
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an encode invalid error
    pub fn encode_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodeInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an error for a 4xx or 5xx response.
    ///
    /// The message reads like `422 Client Error: Unprocessable Entity for url: https://...`.
    pub fn http_status(status: StatusCode, url: impl Into<String>) -> Self {
        let url = url.into();
        let side = if status.is_server_error() {
            "Server Error"
        } else {
            "Client Error"
        };
        let message = format!(
            "{} {side}: {} for url: {url}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        );

        Self {
            kind: ErrorKind::HttpStatus,
            message,
            status: Some(status),
            url: Some(url),
            source: None,
        }
    }

    /// Create a retry exhausted error wrapping the last failure.
    pub fn retry_exhausted(url: impl Into<String>, last: Error) -> Self {
        let url = url.into();
        Self {
            kind: ErrorKind::RetryExhausted,
            message: format!("max retries exceeded for url: {url} (caused by: {last})"),
            status: last.status,
            url: Some(url),
            source: Some(anyhow::Error::from(last)),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::EncodeInvalid => write!(f, "unencodable payload"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::HttpStatus => write!(f, "http error status"),
            ErrorKind::RetryExhausted => write!(f, "retries exhausted"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
