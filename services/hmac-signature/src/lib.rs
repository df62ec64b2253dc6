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

//! HMAC request signer for the XCover partner API.
//!
//! Implements the HMAC flavour of the IETF draft
//! [Signing HTTP Messages](https://datatracker.ietf.org/doc/html/draft-cavage-http-signatures-12).
//!
//! ```
//! use xcover_hmac_signature::{AuthConfig, RequestSigner, SignatureAlgorithm};
//!
//! # fn main() -> xcover_core::Result<()> {
//! let signer = RequestSigner::new(AuthConfig {
//!     api_key: "test_api_key".to_string(),
//!     api_secret: "test_api_secret".to_string(),
//!     algorithm: SignatureAlgorithm::HmacSha256,
//!     headers: "(request-target) date".to_string(),
//! });
//!
//! let (parts, _) = http::Request::get("https://api.xcover.com/xcover/partners/LLODT/quotes/")
//!     .body(())?
//!     .into_parts();
//!
//! let headers = signer.sign(&parts)?;
//! assert!(headers.contains_key(http::header::DATE));
//! assert!(headers.contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::AuthConfig;
pub use config::SignatureAlgorithm;

mod sign_request;
pub use sign_request::build_string_to_sign;
pub use sign_request::RequestSigner;
