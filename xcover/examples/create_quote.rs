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

//! Quote and book through the partner API.
//!
//! Reads `XC_*` from the environment (or `.env`):
//!
//! ```shell
//! XC_BASE_URL=https://api.xcover.com/xcover/ XC_PARTNER_CODE=... \
//! XC_AUTH_API_KEY=... XC_AUTH_API_SECRET=... \
//! cargo run --example create_quote
//! ```

use chrono::{Duration, Utc};
use serde_json::json;
use xcover::{CallOptions, Client, Payload, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let _ = dotenv::dotenv();

    let client = Client::from_env()?;
    println!("using {:?}", client.config());

    let start = Utc::now() + Duration::days(30);
    let quote: Payload = [
        ("currency", Payload::from("AUD")),
        ("customer_country", "AU".into()),
        ("customer_language", "en".into()),
        (
            "request",
            json!([{
                "policy_type": "event_ticket_protection",
                "policy_type_version": 1,
                "tickets": [{"price": 100}],
            }])
            .into(),
        ),
        ("policy_start_date", start.into()),
    ]
    .into_iter()
    .collect();

    let created = client.create_quote(&quote, CallOptions::default()).await?;
    println!("quote: {created:#}");

    let Some(id) = created.get("id").and_then(|v| v.as_str()) else {
        eprintln!("quote response has no id");
        return Ok(());
    };

    let fetched = client.get_quote(id, CallOptions::default()).await?;
    println!("fetched: {fetched:#}");

    Ok(())
}
