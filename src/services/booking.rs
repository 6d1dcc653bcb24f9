use chrono::NaiveDateTime;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries::{self, BookingScope};
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, StateFilter};

/// A request to book an item for a time window.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub item_id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// Creates a booking in WAITING status.
///
/// Booking your own item is reported as "item not found" on purpose: the
/// response must not disclose who owns what.
pub fn create_booking(
    conn: &Connection,
    req: &BookingRequest,
    requester_id: &str,
    now: NaiveDateTime,
) -> Result<Booking, AppError> {
    if req.start_date < now || req.start_date >= req.end_date {
        return Err(AppError::InvalidInput(
            "invalid booking period".to_string(),
        ));
    }

    let booker = queries::get_user(conn, requester_id)?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {requester_id}")))?;

    let item = queries::get_item(conn, &req.item_id)?
        .ok_or_else(|| AppError::NotFound(format!("item not found: {}", req.item_id)))?;
    if !item.available {
        return Err(AppError::InvalidInput(format!(
            "item not available for booking: {}",
            item.id
        )));
    }
    if item.owner_id == booker.id {
        return Err(AppError::NotFound(format!("item not found: {}", item.id)));
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        item_id: item.id,
        booker_id: booker.id,
        start_date: req.start_date,
        end_date: req.end_date,
        status: BookingStatus::Waiting,
        created_at: now,
        updated_at: now,
    };
    queries::create_booking(conn, &booking)?;
    Ok(booking)
}

/// Fetches a booking, visible only to its booker or the item's owner.
/// Anyone else gets the same "booking not found" as a missing id.
pub fn get_booking(
    conn: &Connection,
    booking_id: &str,
    requester_id: &str,
) -> Result<Booking, AppError> {
    let booking = queries::get_booking_by_id(conn, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking not found: {booking_id}")))?;

    let item = queries::get_item(conn, &booking.item_id)?
        .ok_or_else(|| AppError::NotFound(format!("item not found: {}", booking.item_id)))?;

    if booking.booker_id != requester_id && item.owner_id != requester_id {
        return Err(AppError::NotFound(format!(
            "booking not found: {booking_id}"
        )));
    }
    Ok(booking)
}

/// Approves or rejects a booking. Only the item's owner may do this.
///
/// Re-applying the current terminal state (approving an approved booking,
/// rejecting a rejected one) fails; flipping a decision does not.
pub fn update_booking_status(
    conn: &Connection,
    booking_id: &str,
    requester_id: &str,
    approve: bool,
    now: NaiveDateTime,
) -> Result<Booking, AppError> {
    let mut booking = queries::get_booking_by_id(conn, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking not found: {booking_id}")))?;

    let item = queries::get_item(conn, &booking.item_id)?
        .ok_or_else(|| AppError::NotFound(format!("item not found: {}", booking.item_id)))?;
    if item.owner_id != requester_id {
        return Err(AppError::NotFound(format!(
            "booking not found: {booking_id}"
        )));
    }

    match (booking.status, approve) {
        (BookingStatus::Approved, true) => {
            return Err(AppError::IllegalState("booking already approved".to_string()));
        }
        (BookingStatus::Rejected, false) => {
            return Err(AppError::IllegalState("booking already rejected".to_string()));
        }
        _ => {}
    }

    booking.status = if approve {
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    };
    booking.updated_at = now;
    queries::update_booking_status(conn, booking_id, &booking.status, &now)?;
    Ok(booking)
}

/// Bookings made by the requester, newest start first.
pub fn list_by_booker(
    conn: &Connection,
    requester_id: &str,
    state: &str,
    page: i64,
    page_size: i64,
    now: NaiveDateTime,
) -> Result<Vec<Booking>, AppError> {
    list_scoped(conn, BookingScope::Booker, requester_id, state, page, page_size, now)
}

/// Bookings placed on items the requester owns, newest start first.
pub fn list_by_owner(
    conn: &Connection,
    requester_id: &str,
    state: &str,
    page: i64,
    page_size: i64,
    now: NaiveDateTime,
) -> Result<Vec<Booking>, AppError> {
    list_scoped(conn, BookingScope::Owner, requester_id, state, page, page_size, now)
}

fn list_scoped(
    conn: &Connection,
    scope: BookingScope,
    requester_id: &str,
    state: &str,
    page: i64,
    page_size: i64,
    now: NaiveDateTime,
) -> Result<Vec<Booking>, AppError> {
    if queries::get_user(conn, requester_id)?.is_none() {
        return Err(AppError::NotFound(format!(
            "user not found: {requester_id}"
        )));
    }

    let filter = StateFilter::parse(state)
        .ok_or_else(|| AppError::IllegalState(format!("Unknown state: {state}")))?;

    if page < 0 || page_size <= 0 {
        return Err(AppError::InvalidInput(
            "invalid pagination parameters".to_string(),
        ));
    }

    let bookings =
        queries::list_bookings(conn, scope, requester_id, filter, &now, page_size, page * page_size)?;
    Ok(bookings)
}
