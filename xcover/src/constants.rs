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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use std::time::Duration;

// Env values used by the client.
pub const XC_BASE_URL: &str = "XC_BASE_URL";
pub const XC_PARTNER_CODE: &str = "XC_PARTNER_CODE";
pub const XC_HTTP_TIMEOUT: &str = "XC_HTTP_TIMEOUT";
pub const XC_AUTH_API_KEY: &str = "XC_AUTH_API_KEY";
pub const XC_AUTH_API_SECRET: &str = "XC_AUTH_API_SECRET";
pub const XC_AUTH_ALGORITHM: &str = "XC_AUTH_ALGORITHM";
pub const XC_AUTH_HEADERS: &str = "XC_AUTH_HEADERS";
pub const XC_RETRY_TOTAL: &str = "XC_RETRY_TOTAL";
pub const XC_RETRY_BACKOFF_FACTOR: &str = "XC_RETRY_BACKOFF_FACTOR";

// Headers used by the client.
pub const X_IDEMPOTENCY_KEY: &str = "x-idempotency-key";
pub const APPLICATION_JSON: &str = "application/json";

pub const DEFAULT_SIGNED_HEADERS: &str = "(request-target) date";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound of a computed backoff delay.
pub const BACKOFF_MAX: Duration = Duration::from_secs(120);

/// AsciiSet for ids placed into a path segment.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
