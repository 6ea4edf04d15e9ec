//! Community event model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{EntityId, DEFAULT_IS_ACTIVE};

/// A scheduled activity on the lifestyle calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub date: DateTime<Utc>,
    /// Free-form display time, e.g. "19:00".
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: bool,
}

/// Input for creating an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(deserialize_with = "deserialize_event_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Event {
    pub fn from_new(id: EntityId, input: NewEvent) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            image: input.image,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            is_active: input.is_active.unwrap_or(DEFAULT_IS_ACTIVE),
        }
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_event_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid event date '{}'", raw))
    })
}
