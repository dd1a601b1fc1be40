use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FramedError, FramedResult};

/// How a slot's date is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    Weekday,
    Weekend,
    #[default]
    Specific,
}

impl DateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateType::Weekday => "weekday",
            DateType::Weekend => "weekend",
            DateType::Specific => "specific",
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateType {
    type Err = FramedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekday" => Ok(DateType::Weekday),
            "weekend" => Ok(DateType::Weekend),
            "specific" => Ok(DateType::Specific),
            other => Err(FramedError::Validation(format!("Unknown date type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub date_type: DateType,
    pub specific_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    /// Capacity left once `confirmed` bookings are counted. Can go negative when
    /// the operator lowers `max_bookings` below the confirmed count.
    pub fn remaining_capacity(&self, confirmed: i64) -> i64 {
        i64::from(self.max_bookings) - confirmed
    }

    /// Human readable window, e.g. `2026-10-20 10:00-11:30` or `Weekends 12:00-14:00`.
    pub fn label(&self) -> String {
        let window = format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        );
        match (self.date_type, self.specific_date) {
            (DateType::Specific, Some(date)) => format!("{} {}", date.format("%Y-%m-%d"), window),
            (DateType::Weekday, _) => format!("Weekdays {}", window),
            _ => format!("Weekends {}", window),
        }
    }
}

/// A slot together with the number of confirmed bookings held against it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotOccupancy {
    pub slot: TimeSlot,
    pub confirmed_count: i64,
}

impl SlotOccupancy {
    pub fn remaining_capacity(&self) -> i64 {
        self.slot.remaining_capacity(self.confirmed_count)
    }

    pub fn is_fully_booked(&self) -> bool {
        self.remaining_capacity() <= 0
    }

    /// Open for new submissions: flagged available and not fully booked.
    pub fn is_bookable(&self) -> bool {
        self.slot.is_available && !self.is_fully_booked()
    }
}

fn default_true() -> bool {
    true
}

fn default_max_bookings() -> i32 {
    1
}

/// Operator input for creating or replacing a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotDraft {
    #[serde(default)]
    pub date_type: DateType,
    pub specific_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default = "default_max_bookings")]
    pub max_bookings: i32,
}

/// A draft that passed [`TimeSlotDraft::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeSlot {
    pub date_type: DateType,
    pub specific_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
}

impl TimeSlotDraft {
    /// Checks the slot invariants against `today` in the site's timezone.
    ///
    /// # Errors
    ///
    /// * `FramedError::Validation` when a specific-date slot has no date, a
    ///   time is missing, the start is not before the end, the date is in the
    ///   past, or the capacity is not positive.
    pub fn validate(&self, today: NaiveDate) -> FramedResult<NewTimeSlot> {
        if self.date_type == DateType::Specific && self.specific_date.is_none() {
            return Err(FramedError::Validation(
                "A specific-date slot requires a date".to_string(),
            ));
        }

        let (start_time, end_time) = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(FramedError::Validation(
                    "Both start and end time must be provided".to_string(),
                ));
            }
        };

        if start_time >= end_time {
            return Err(FramedError::Validation(
                "Start time must be earlier than end time".to_string(),
            ));
        }

        if let (DateType::Specific, Some(date)) = (self.date_type, self.specific_date) {
            if date < today {
                return Err(FramedError::Validation(
                    "Slots cannot be created for past dates".to_string(),
                ));
            }
        }

        if self.max_bookings < 1 {
            return Err(FramedError::Validation(
                "Maximum bookings must be a positive number".to_string(),
            ));
        }

        Ok(NewTimeSlot {
            date_type: self.date_type,
            specific_date: self.specific_date,
            start_time,
            end_time,
            is_available: self.is_available,
            max_bookings: self.max_bookings,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotResponse {
    pub id: Uuid,
    pub date_type: DateType,
    pub specific_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
    pub confirmed_count: i64,
    pub remaining_capacity: i64,
    pub label: String,
}

impl From<SlotOccupancy> for TimeSlotResponse {
    fn from(occupancy: SlotOccupancy) -> Self {
        let remaining_capacity = occupancy.remaining_capacity();
        let label = occupancy.slot.label();
        let SlotOccupancy {
            slot,
            confirmed_count,
        } = occupancy;

        Self {
            id: slot.id,
            date_type: slot.date_type,
            specific_date: slot.specific_date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_available: slot.is_available,
            max_bookings: slot.max_bookings,
            confirmed_count,
            remaining_capacity,
            label,
        }
    }
}

/// Bulk availability toggle issued from the administrative API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAvailabilityRequest {
    pub ids: Vec<Uuid>,
    pub is_available: bool,
}
