use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sync::Record;

/// Day of the week, 0 = Monday through 6 = Sunday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

impl Weekday {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn name(self) -> &'static str {
        DAY_NAMES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Weekday> {
        (0..7).map(Weekday)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 7 {
            Ok(Self(value))
        } else {
            Err(ValidationError::WeekdayOutOfRange(value))
        }
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.0
    }
}

/// Parse `HH:MM` (or the `HH:MM:SS` form SQL `time` columns return).
pub fn parse_time(text: &str) -> Result<NaiveTime, ValidationError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime(text.to_string()))
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(d)?
            .filter(|s| !s.trim().is_empty())
            .map(|s| super::parse_time(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// A row of the `business_hours` table.
///
/// `is_closed` and `is_24_hours` are mutually exclusive: the setters clear
/// the other flag whenever one is switched on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BusinessHours {
    /// Absent for days that were never saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub company_id: String,
    #[schema(value_type = u8, minimum = 0, maximum = 6)]
    pub day_of_week: Weekday,
    #[serde(default, with = "hhmm")]
    #[schema(value_type = Option<String>, example = "08:00")]
    pub open_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    #[schema(value_type = Option<String>, example = "18:00")]
    pub close_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub is_closed: bool,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub is_24_hours: bool,
}

impl Record for BusinessHours {
    const TABLE: &'static str = "business_hours";
}

/// Column values written when saving one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursFields {
    pub company_id: String,
    pub day_of_week: Weekday,
    #[serde(with = "hhmm")]
    pub open_time: Option<NaiveTime>,
    #[serde(with = "hhmm")]
    pub close_time: Option<NaiveTime>,
    pub is_closed: bool,
    pub is_24_hours: bool,
}

impl BusinessHours {
    /// An unsaved day, closed.
    pub fn closed(company_id: &str, day: Weekday) -> Self {
        Self {
            id: None,
            company_id: company_id.to_string(),
            day_of_week: day,
            open_time: None,
            close_time: None,
            is_closed: true,
            is_24_hours: false,
        }
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.is_closed = closed;
        if closed {
            self.is_24_hours = false;
        }
    }

    pub fn set_24_hours(&mut self, all_day: bool) {
        self.is_24_hours = all_day;
        if all_day {
            self.is_closed = false;
        }
    }

    /// Regular opening hours. Clears both the closed and 24-hours flags.
    pub fn set_times(&mut self, open: NaiveTime, close: NaiveTime) {
        self.open_time = Some(open);
        self.close_time = Some(close);
        self.is_closed = false;
        self.is_24_hours = false;
    }

    pub fn fields(&self) -> HoursFields {
        HoursFields {
            company_id: self.company_id.clone(),
            day_of_week: self.day_of_week,
            open_time: self.open_time,
            close_time: self.close_time,
            is_closed: self.is_closed,
            is_24_hours: self.is_24_hours,
        }
    }

    pub fn describe(&self) -> String {
        if self.is_closed {
            return "Closed".into();
        }
        if self.is_24_hours {
            return "Open 24 hours".into();
        }
        match (self.open_time, self.close_time) {
            (Some(open), Some(close)) => {
                format!("{} - {}", open.format("%H:%M"), close.format("%H:%M"))
            }
            _ => "Hours not set".into(),
        }
    }
}

/// One entry per weekday, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct WeekHours {
    pub days: Vec<BusinessHours>,
}

impl WeekHours {
    /// Fill the week from stored rows; days without a row are closed.
    pub fn from_rows(company_id: &str, rows: Vec<BusinessHours>) -> Self {
        let mut days: Vec<BusinessHours> = Weekday::all()
            .map(|day| BusinessHours::closed(company_id, day))
            .collect();
        for row in rows {
            let index = row.day_of_week.index();
            days[index] = row;
        }
        Self { days }
    }

    pub fn day(&self, day: Weekday) -> &BusinessHours {
        &self.days[day.index()]
    }

    pub fn replace(&mut self, hours: BusinessHours) {
        let index = hours.day_of_week.index();
        self.days[index] = hours;
    }
}
