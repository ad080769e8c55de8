use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for `createdAt` that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            // Dashboard exports use Unix milliseconds
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}
