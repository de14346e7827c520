//! (De)serialize a [Duration] as a number of seconds, e.g. `"sleep_time": 1.5`.
//!
//! Use with `#[serde(with = "crate::utils::timing::secs")]`.

pub mod secs {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::de::Error;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| D::Error::custom(format!("invalid number of seconds {}: {}", secs, e)))
    }
}
