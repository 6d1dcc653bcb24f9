use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

// POST /users
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
    };

    let db = state.db.lock().unwrap();
    queries::create_user(&db, &user)?;
    Ok(Json(user))
}

// GET /users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let db = state.db.lock().unwrap();
    let user = queries::get_user(&db, &id)?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {id}")))?;
    Ok(Json(user))
}
