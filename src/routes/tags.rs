//! # 태그 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/tags | `list_tags` | 내 태그 목록 (이름순) |
//! | POST | /api/v1/tags | `create_tag` | 새 태그 생성 (201) |
//! | GET | /api/v1/tags/{id} | `get_tag` | 태그 조회 |
//! | PATCH | /api/v1/tags/{id} | `update_tag` | 이름 변경 |
//! | DELETE | /api/v1/tags/{id} | `delete_tag` | 태그 삭제 (204) |
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 애플리케이션 공유 상태 (DB 풀 등)
//! - `ActingUser`: `X-User-Id` 헤더에서 꺼낸 요청자
//! - `Path(id)`: URL 경로의 변수 (`{id}` 부분)
//! - `Json(req)`: 요청 본문을 구조체로 파싱
//!
//! 다른 사용자의 태그는 존재하지 않는 것과 똑같이 404입니다.

use crate::{
    error::AppError,
    middleware::ActingUser,
    models::*,
    routes::AppState,
    services::tags,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list_tags(
    State(state): State<AppState>,
    user: ActingUser,
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = tags::list_tags(&state.pool, user.user_id).await?;
    Ok(Json(tags))
}

/// `POST /api/v1/tags` + `{ "name": "..." }` → `201 Created`
///
/// 같은 사용자에게 같은 이름의 태그가 있으면 409입니다.
pub async fn create_tag(
    State(state): State<AppState>,
    user: ActingUser,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let tag = tags::create_tag(&state.pool, user.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn get_tag(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
) -> Result<Json<Tag>, AppError> {
    let tag = tags::get_tag(&state.pool, user.user_id, id).await?;
    Ok(Json(tag))
}

pub async fn update_tag(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTagRequest>,
) -> Result<Json<Tag>, AppError> {
    let tag = tags::update_tag(&state.pool, user.user_id, id, &req).await?;
    Ok(Json(tag))
}

/// `DELETE /api/v1/tags/{id}` → `204 No Content`
///
/// 연결된 항목은 남고 연결만 사라집니다.
pub async fn delete_tag(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tags::delete_tag(&state.pool, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
