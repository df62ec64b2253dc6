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

//! Client for the XCover partner API.
//!
//! Requests are signed with HMAC following the "Signing HTTP Messages"
//! draft, sent with an idempotency key where the operation mutates state,
//! and retried on transient failures when asked to.
//!
//! ## Example
//!
//! ```no_run
//! use xcover::{CallOptions, Client, Config, Payload};
//!
//! # async fn example() -> xcover::Result<()> {
//! let client = Client::with_config(Config {
//!     base_url: Some("https://api.xcover.com/xcover/".to_string()),
//!     partner_code: Some("LLODT".to_string()),
//!     auth_api_key: Some("api_key".to_string()),
//!     auth_api_secret: Some("api_secret".to_string()),
//!     retry_total: 3,
//!     retry_backoff_factor: 0.5,
//!     ..Default::default()
//! })?;
//!
//! let quote: Payload = serde_json::json!({
//!     "request": [{"policy_type": "event_ticket_protection"}],
//!     "currency": "AUD",
//! })
//! .into();
//! let created = client.create_quote(&quote, CallOptions::default()).await?;
//! println!("{created}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `default-context` (default): [`default_context`], [`Client::with_config`]
//!   and [`Client::from_env`], sending with reqwest.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

pub use xcover_core::*;
pub use xcover_hmac_signature::{build_string_to_sign, AuthConfig, RequestSigner, SignatureAlgorithm};

mod constants;

mod config;
pub use config::Config;
pub use config::HttpTimeout;

mod encoder;
pub use encoder::bytes_as_text;
pub use encoder::encode;
pub use encoder::Payload;

mod retry;
pub use retry::is_retryable_method;
pub use retry::RetryHttpSend;
pub use retry::RetryPolicy;
pub use retry::RETRY_STATUSES;

mod timeout;
pub use timeout::TimeoutHttpSend;

mod operation;

mod client;
pub use client::CallOptions;
pub use client::Client;

mod endpoints;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;
