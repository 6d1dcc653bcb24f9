use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::requester_id;
use crate::models::Booking;
use crate::services::booking::{self, BookingRequest};
use crate::state::AppState;

const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
pub struct BookingResponse {
    id: String,
    item_id: String,
    booker_id: String,
    start_date: String,
    end_date: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            item_id: b.item_id,
            booker_id: b.booker_id,
            start_date: b.start_date.format(DT_FORMAT).to_string(),
            end_date: b.end_date.format(DT_FORMAT).to_string(),
            status: b.status.as_str().to_string(),
            created_at: b.created_at.format(DT_FORMAT).to_string(),
            updated_at: b.updated_at.format(DT_FORMAT).to_string(),
        }
    }
}

fn parse_dt(s: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(s, DT_FORMAT)
        .map_err(|_| AppError::InvalidInput(format!("invalid datetime: {s}")))
}

// POST /bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: String,
    pub start_date: String,
    pub end_date: String,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let requester = requester_id(&headers)?;
    let request = BookingRequest {
        item_id: req.item_id,
        start_date: parse_dt(&req.start_date)?,
        end_date: parse_dt(&req.end_date)?,
    };

    let db = state.db.lock().unwrap();
    let booking = booking::create_booking(&db, &request, &requester, Utc::now().naive_utc())?;
    Ok(Json(booking.into()))
}

// GET /bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let requester = requester_id(&headers)?;

    let db = state.db.lock().unwrap();
    let booking = booking::get_booking(&db, &id, &requester)?;
    Ok(Json(booking.into()))
}

// PATCH /bookings/:id?approved=true|false
#[derive(Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ApproveQuery>,
) -> Result<Json<BookingResponse>, AppError> {
    let requester = requester_id(&headers)?;

    let db = state.db.lock().unwrap();
    let booking = booking::update_booking_status(
        &db,
        &id,
        &requester,
        query.approved,
        Utc::now().naive_utc(),
    )?;
    Ok(Json(booking.into()))
}

// GET /bookings and GET /bookings/owner
#[derive(Deserialize)]
pub struct ListQuery {
    pub state: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn list_by_booker(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let requester = requester_id(&headers)?;
    let state_raw = query.state.as_deref().unwrap_or("ALL");
    let page = query.page.unwrap_or(0);
    let page_size = query.page_size.unwrap_or(50);

    let db = state.db.lock().unwrap();
    let bookings = booking::list_by_booker(
        &db,
        &requester,
        state_raw,
        page,
        page_size,
        Utc::now().naive_utc(),
    )?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

pub async fn list_by_owner(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let requester = requester_id(&headers)?;
    let state_raw = query.state.as_deref().unwrap_or("ALL");
    let page = query.page.unwrap_or(0);
    let page_size = query.page_size.unwrap_or(50);

    let db = state.db.lock().unwrap();
    let bookings = booking::list_by_owner(
        &db,
        &requester,
        state_raw,
        page,
        page_size,
        Utc::now().naive_utc(),
    )?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}
