use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::requester_id;
use crate::models::Item;
use crate::state::AppState;

// POST /items
#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
    pub available: Option<bool>,
    pub request_id: Option<String>,
}

pub async fn create_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<Item>, AppError> {
    let owner_id = requester_id(&headers)?;

    let db = state.db.lock().unwrap();
    if queries::get_user(&db, &owner_id)?.is_none() {
        return Err(AppError::NotFound(format!("user not found: {owner_id}")));
    }

    let item = Item {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        description: req.description,
        available: req.available.unwrap_or(true),
        owner_id,
        request_id: req.request_id,
    };
    queries::create_item(&db, &item)?;
    Ok(Json(item))
}

// GET /items/:id
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let db = state.db.lock().unwrap();
    let item = queries::get_item(&db, &id)?
        .ok_or_else(|| AppError::NotFound(format!("item not found: {id}")))?;
    Ok(Json(item))
}
