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

//! JSON request bodies.
//!
//! Any [`Serialize`] value can be sent. [`Payload`] adds the value kinds the
//! API expects in a canonical text form:
//!
//! | Value | Encoded as |
//! |---|---|
//! | naive timestamp | `"2020-01-01T00:00:00"` |
//! | UTC timestamp | `"2020-01-01T00:00:00Z"` |
//! | offset timestamp | `"2020-01-01T00:00:00+23:59"` |
//! | date | `"2020-01-01"` |
//! | decimal | JSON float, precision may be lost |
//! | uuid | lowercase hyphenated string |
//! | bytes | UTF-8 text, never base64 |
//!
//! A [`Decimal`] field of a derived struct is written as a JSON float too.
//! Serde treats `Vec<u8>` and `&[u8]` fields as number sequences, so mark
//! them with `#[serde(serialize_with = "xcover::bytes_as_text")]` or carry
//! them in [`Payload::Bytes`].

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use rust_decimal::Decimal;
use serde::ser::{Error as SerError, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use uuid::Uuid;
use xcover_core::{Error, Result};

/// A JSON value extended with the types the API encodes canonically.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any JSON number.
    Number(serde_json::Number),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Vec<Payload>),
    /// A JSON object, keys keep insertion order.
    Object(Vec<(String, Payload)>),
    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
    /// Timestamp with a UTC offset.
    DateTimeTz(DateTime<FixedOffset>),
    /// Calendar date.
    Date(NaiveDate),
    /// Fixed point decimal.
    Decimal(Decimal),
    /// Unique identifier.
    Uuid(Uuid),
    /// Raw bytes that must hold UTF-8 text.
    Bytes(Vec<u8>),
}

impl Payload {
    /// Look up a key of an object payload.
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Payload::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Payload::Null => serializer.serialize_unit(),
            Payload::Bool(v) => serializer.serialize_bool(*v),
            Payload::Number(v) => v.serialize(serializer),
            Payload::String(v) => serializer.serialize_str(v),
            Payload::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Payload::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Payload::DateTime(v) => {
                let format = if v.nanosecond() == 0 {
                    "%Y-%m-%dT%H:%M:%S"
                } else {
                    "%Y-%m-%dT%H:%M:%S%.6f"
                };
                serializer.collect_str(&v.format(format))
            }
            Payload::DateTimeTz(v) => {
                let precision = if v.nanosecond() == 0 {
                    SecondsFormat::Secs
                } else {
                    SecondsFormat::Micros
                };
                serializer.serialize_str(&v.to_rfc3339_opts(precision, true))
            }
            Payload::Date(v) => serializer.collect_str(&v.format("%Y-%m-%d")),
            Payload::Decimal(v) => {
                let f = v.to_string().parse::<f64>().map_err(S::Error::custom)?;
                serializer.serialize_f64(f)
            }
            Payload::Uuid(v) => serializer.collect_str(&v.hyphenated()),
            Payload::Bytes(v) => bytes_as_text(v, serializer),
        }
    }
}

/// Serialize bytes as UTF-8 text.
///
/// For `#[serde(serialize_with = "xcover::bytes_as_text")]` on byte fields.
/// Bytes that are not valid UTF-8 fail to serialize.
pub fn bytes_as_text<S>(v: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = std::str::from_utf8(v)
        .map_err(|e| S::Error::custom(format!("bytes payload is not valid utf-8: {e}")))?;
    serializer.serialize_str(s)
}

/// Encode a payload into a JSON request body.
///
/// Values JSON cannot represent, like non UTF-8 bytes or map keys that are
/// not strings, fail with [`ErrorKind::EncodeInvalid`](xcover_core::ErrorKind::EncodeInvalid).
pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<Bytes> {
    serde_json::to_vec(payload).map(Bytes::from).map_err(|e| {
        Error::encode_invalid(format!("failed to encode payload: {e}")).with_source(e)
    })
}

impl From<serde_json::Value> for Payload {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Payload::Null,
            serde_json::Value::Bool(v) => Payload::Bool(v),
            serde_json::Value::Number(v) => Payload::Number(v),
            serde_json::Value::String(v) => Payload::String(v),
            serde_json::Value::Array(v) => Payload::Array(v.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(v) => {
                Payload::Object(v.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for Payload {
    fn from(v: bool) -> Self {
        Payload::Bool(v)
    }
}

impl From<i64> for Payload {
    fn from(v: i64) -> Self {
        Payload::Number(v.into())
    }
}

impl From<i32> for Payload {
    fn from(v: i32) -> Self {
        Payload::Number(v.into())
    }
}

impl From<u64> for Payload {
    fn from(v: u64) -> Self {
        Payload::Number(v.into())
    }
}

impl From<f64> for Payload {
    /// Non finite floats become `null`, like `serde_json::Value`.
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v).map_or(Payload::Null, Payload::Number)
    }
}

impl From<&str> for Payload {
    fn from(v: &str) -> Self {
        Payload::String(v.to_string())
    }
}

impl From<String> for Payload {
    fn from(v: String) -> Self {
        Payload::String(v)
    }
}

impl From<NaiveDateTime> for Payload {
    fn from(v: NaiveDateTime) -> Self {
        Payload::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Payload {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Payload::DateTimeTz(v)
    }
}

impl From<DateTime<Utc>> for Payload {
    fn from(v: DateTime<Utc>) -> Self {
        Payload::DateTimeTz(v.fixed_offset())
    }
}

impl From<NaiveDate> for Payload {
    fn from(v: NaiveDate) -> Self {
        Payload::Date(v)
    }
}

impl From<Decimal> for Payload {
    fn from(v: Decimal) -> Self {
        Payload::Decimal(v)
    }
}

impl From<Uuid> for Payload {
    fn from(v: Uuid) -> Self {
        Payload::Uuid(v)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Payload::Bytes(v)
    }
}

impl From<&[u8]> for Payload {
    fn from(v: &[u8]) -> Self {
        Payload::Bytes(v.to_vec())
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(v: Vec<Payload>) -> Self {
        Payload::Array(v)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(v: Option<T>) -> Self {
        v.map_or(Payload::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Payload>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Payload::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
