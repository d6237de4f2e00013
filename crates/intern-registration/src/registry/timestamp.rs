//! `created_at` encoding: naive local time, microsecond fraction.
//!
//! The fraction is always six digits and is omitted entirely when zero.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const WHOLE_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const WITH_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let format = if value.nanosecond() == 0 {
        WHOLE_SECONDS
    } else {
        WITH_MICROS
    };
    serializer.collect_str(&value.format(format))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}
