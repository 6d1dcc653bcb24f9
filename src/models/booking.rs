use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub item_id: String,
    pub booker_id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Approval lifecycle of a single booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "waiting",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => BookingStatus::Approved,
            "rejected" => BookingStatus::Rejected,
            _ => BookingStatus::Waiting,
        }
    }
}

/// Filter keyword selecting a temporal/status subset of bookings.
///
/// Unlike [`BookingStatus::parse`], an unrecognized keyword here is a caller
/// error, so parsing returns `None` instead of a default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl StateFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Some(StateFilter::All),
            "CURRENT" => Some(StateFilter::Current),
            "PAST" => Some(StateFilter::Past),
            "FUTURE" => Some(StateFilter::Future),
            "WAITING" => Some(StateFilter::Waiting),
            "REJECTED" => Some(StateFilter::Rejected),
            _ => None,
        }
    }
}
