//! Text form of stored timestamps: `YYYY-MM-DD HH:MM:SS[.ffffff]`.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const WHOLE_SECONDS: &str = "%Y-%m-%d %H:%M:%S";
const WITH_MICROS: &str = "%Y-%m-%d %H:%M:%S%.6f";

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
    let text = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f").map_err(serde::de::Error::custom)
}
