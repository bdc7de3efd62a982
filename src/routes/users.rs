//! # 사용자 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/users | `list_users` | 전체 사용자 목록 |
//! | POST | /api/v1/users | `create_user` | 사용자 생성 (201) |
//! | GET | /api/v1/users/{id} | `get_user` | 사용자 조회 |
//! | PATCH | /api/v1/users/{id} | `update_user` | 부분 수정 |
//! | DELETE | /api/v1/users/{id} | `delete_user` | 삭제, 소유한 태그/항목도 함께 삭제 |
//!
//! 사용자 API는 `X-User-Id`로 범위가 제한되지 않습니다.

use crate::{error::AppError, models::*, routes::AppState, services::users};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = users::list_users(&state.pool).await?;
    Ok(Json(users))
}

/// `POST /api/v1/users` + `{ "email": "...", "display_name": "..." }` → `201 Created`
///
/// 같은 이메일이 이미 있으면 409입니다.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = users::create_user(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = users::get_user(&state.pool, id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    let user = users::update_user(&state.pool, id, &patch).await?;
    Ok(Json(user))
}

/// `DELETE /api/v1/users/{id}` → `{ "id": 1 }`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let id = users::delete_user(&state.pool, id).await?;
    Ok(Json(json!({ "id": id })))
}
