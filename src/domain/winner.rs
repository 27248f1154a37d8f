// src/domain/winner.rs
//
// Winner Entity
//
// Append-only history entry. Never mutated, never deduplicated: the same
// name may win several distinct draws.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// day/month/year hour:minute:second
pub const WINNER_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    #[serde(alias = "FullName")]
    pub full_name: String,

    /// Local time of the draw confirmation
    #[serde(alias = "DateTime")]
    pub date_time: String,
}

impl Winner {
    /// Winner stamped with the current local time
    pub fn now(full_name: impl Into<String>) -> Self {
        Self::at(full_name, Local::now())
    }

    pub fn at<Tz>(full_name: impl Into<String>, when: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            full_name: full_name.into(),
            date_time: when.format(WINNER_TIMESTAMP_FORMAT).to_string(),
        }
    }
}
