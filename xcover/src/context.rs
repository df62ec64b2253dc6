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

use crate::client::Client;
use crate::config::{Config, HttpTimeout};
use xcover_core::{Context, OsEnv, Result};
use xcover_http_send_reqwest::ReqwestHttpSend;

/// Build a [`Context`] that reads the OS environment and sends with reqwest.
pub fn default_context(timeout: &HttpTimeout) -> Result<Context> {
    let http = ReqwestHttpSend::with_timeouts(timeout.connect(), timeout.read())?;
    Ok(Context::new().with_env(OsEnv).with_http_send(http))
}

impl Client {
    /// Create a client sending with reqwest.
    pub fn with_config(config: Config) -> Result<Self> {
        let ctx = default_context(&config.http_timeout)?;
        Self::new(ctx, config)
    }

    /// Create a client configured from `XC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env(&Context::new().with_env(OsEnv))?;
        Self::with_config(config)
    }
}
