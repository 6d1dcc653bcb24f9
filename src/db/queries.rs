use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, Item, StateFilter, User};

const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Users ──

pub fn create_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)",
        params![user.id, user.name, user.email],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name, email FROM users WHERE id = ?1",
        params![id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        },
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Items ──

pub fn create_item(conn: &Connection, item: &Item) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO items (id, name, description, available, owner_id, request_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            item.id,
            item.name,
            item.description,
            item.available as i32,
            item.owner_id,
            item.request_id,
        ],
    )?;
    Ok(())
}

pub fn get_item(conn: &Connection, id: &str) -> anyhow::Result<Option<Item>> {
    let result = conn.query_row(
        "SELECT id, name, description, available, owner_id, request_id FROM items WHERE id = ?1",
        params![id],
        |row| {
            Ok(Item {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                available: row.get::<_, i32>(3)? != 0,
                owner_id: row.get(4)?,
                request_id: row.get(5)?,
            })
        },
    );

    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Bookings ──

/// Whose bookings a list query covers: those made by the user, or those
/// placed on items the user owns.
#[derive(Debug, Clone, Copy)]
pub enum BookingScope {
    Booker,
    Owner,
}

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, item_id, booker_id, start_date, end_date, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            booking.id,
            booking.item_id,
            booking.booker_id,
            booking.start_date.format(DT_FORMAT).to_string(),
            booking.end_date.format(DT_FORMAT).to_string(),
            booking.status.as_str(),
            booking.created_at.format(DT_FORMAT).to_string(),
            booking.updated_at.format(DT_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, item_id, booker_id, start_date, end_date, status, created_at, updated_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: &BookingStatus,
    updated_at: &NaiveDateTime,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![
            status.as_str(),
            updated_at.format(DT_FORMAT).to_string(),
            id
        ],
    )?;
    Ok(count > 0)
}

/// State-filtered booking list, scoped to a booker or an item owner.
///
/// Filtering, ordering and pagination all happen in SQL; both scopes share
/// this one query builder so their filter semantics cannot drift apart.
pub fn list_bookings(
    conn: &Connection,
    scope: BookingScope,
    user_id: &str,
    filter: StateFilter,
    now: &NaiveDateTime,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Booking>> {
    let scope_clause = match scope {
        BookingScope::Booker => "b.booker_id = ?",
        BookingScope::Owner => "i.owner_id = ?",
    };

    let now_str = now.format(DT_FORMAT).to_string();
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> =
        vec![Box::new(user_id.to_string())];

    let filter_clause = match filter {
        StateFilter::All => "",
        StateFilter::Current => {
            params_vec.push(Box::new(now_str.clone()));
            params_vec.push(Box::new(now_str.clone()));
            " AND b.start_date <= ? AND b.end_date >= ?"
        }
        StateFilter::Past => {
            params_vec.push(Box::new(now_str.clone()));
            " AND b.end_date < ? AND b.status = 'approved'"
        }
        StateFilter::Future => {
            params_vec.push(Box::new(now_str.clone()));
            " AND b.start_date > ?"
        }
        StateFilter::Waiting => " AND b.status = 'waiting'",
        StateFilter::Rejected => " AND b.status = 'rejected'",
    };

    params_vec.push(Box::new(limit));
    params_vec.push(Box::new(offset));

    let sql = format!(
        "SELECT b.id, b.item_id, b.booker_id, b.start_date, b.end_date, b.status, b.created_at, b.updated_at
         FROM bookings b
         INNER JOIN items i ON i.id = b.item_id
         WHERE {scope_clause}{filter_clause}
         ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
    );

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let item_id: String = row.get(1)?;
    let booker_id: String = row.get(2)?;
    let start_str: String = row.get(3)?;
    let end_str: String = row.get(4)?;
    let status_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;

    let start_date = NaiveDateTime::parse_from_str(&start_str, DT_FORMAT)?;
    let end_date = NaiveDateTime::parse_from_str(&end_str, DT_FORMAT)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, DT_FORMAT)?;
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, DT_FORMAT)?;

    Ok(Booking {
        id,
        item_id,
        booker_id,
        start_date,
        end_date,
        status: BookingStatus::parse(&status_str),
        created_at,
        updated_at,
    })
}
