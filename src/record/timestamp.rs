//! Serde helpers for record timestamps.
//!
//! Timestamps are written as RFC 3339. When reading, a plain calendar date
//! (`2024-09-24`) or a date-time without an offset (`2024-09-24T12:30:00`) is
//! also accepted and interpreted as UTC.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// Parse `text` as a timestamp, see the [module docs](self) for the accepted formats.
pub fn parse(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(timestamp);
    }

    let naive_format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    if let Ok(date_time) = PrimitiveDateTime::parse(text, naive_format) {
        return Ok(date_time.assume_utc());
    }

    let date = Date::parse(text, format_description!("[year]-[month]-[day]"))?;

    Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
}

pub fn serialize<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = timestamp.format(&Rfc3339).map_err(S::Error::custom)?;

    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse(&text).map_err(|error| D::Error::custom(format!("invalid timestamp \"{text}\": {error}")))
}

/// The same as the parent module for optional timestamps.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::OffsetDateTime;

    pub fn serialize<S>(timestamp: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match timestamp {
            Some(timestamp) => super::serialize(timestamp, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| {
                super::parse(&text).map_err(|error| {
                    D::Error::custom(format!("invalid timestamp \"{text}\": {error}"))
                })
            })
            .transpose()
    }
}
