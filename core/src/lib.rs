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

//! Core components for talking to the XCover partner API.
//!
//! This crate provides the foundational types shared by the signer, the
//! transports and the client.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **Error**: The single error type surfaced to callers, classified by [`ErrorKind`]
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use xcover_core::{Context, HttpSend, OsEnv, Result};
//!
//! #[derive(Debug)]
//! struct EchoHttpSend;
//!
//! #[async_trait::async_trait]
//! impl HttpSend for EchoHttpSend {
//!     async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(req.into_body()))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(EchoHttpSend).with_env(OsEnv);
//!
//! let req = http::Request::get("https://api.xcover.com/xcover/").body(Bytes::new())?;
//! let resp = ctx.http_send(req).await?;
//! assert!(resp.status().is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: HTTP date helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
