//! # 항목 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/items | `list_items` | 필터/정렬/페이지 목록 |
//! | POST | /api/v1/items | `create_item` | 항목 생성 (201) |
//! | GET | /api/v1/items/{id} | `get_item` | 항목 조회 |
//! | PATCH | /api/v1/items/{id} | `update_item` | 부분 수정 |
//! | DELETE | /api/v1/items/{id} | `delete_item` | 항목 삭제 (204) |
//! | POST | /api/v1/items/{id}/tags | `add_item_tags` | 태그 추가 연결 |
//! | DELETE | /api/v1/items/{id}/tags | `remove_item_tags` | 태그 연결 해제 |
//!
//! 목록 조회는 `axum_extra::extract::Query`를 씁니다. axum 기본 `Query`와 달리
//! `?tag_ids=1&tag_ids=2`처럼 같은 키가 반복되는 쿼리를 `Vec`으로 받을 수 있습니다.

use crate::{
    error::AppError,
    middleware::ActingUser,
    models::*,
    routes::AppState,
    services::items,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;

/// `GET /api/v1/items?status=reading&tag_ids=1&sort_by=priority&limit=10`
///
/// → `{ "items": [...], "total": 42, "limit": 10, "offset": 0 }`
///
/// 잘못된 enum 값(`status=unknown` 등)은 400입니다.
/// `sort_by`/`sort_dir`의 알 수 없는 값은 기본값으로 대체됩니다.
pub async fn list_items(
    State(state): State<AppState>,
    user: ActingUser,
    Query(filter): Query<ItemFilter>,
) -> Result<Json<ItemPage>, AppError> {
    let page = items::list_items(&state.pool, user.user_id, filter, state.max_page_limit).await?;
    Ok(Json(page))
}

/// `POST /api/v1/items` → `201 Created`
///
/// `tag_ids` 중 하나라도 요청자의 태그가 아니면 400이고 아무것도 만들지 않습니다.
pub async fn create_item(
    State(state): State<AppState>,
    user: ActingUser,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let item = items::create_item(&state.pool, user.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = items::get_item(&state.pool, user.user_id, id).await?;
    Ok(Json(item))
}

/// `PATCH /api/v1/items/{id}`
///
/// 보낸 필드만 바뀝니다. `"notes": null`은 메모 삭제, `"tag_ids": []`는 태그 전체 해제.
pub async fn update_item(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = items::update_item(&state.pool, user.user_id, id, &patch).await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    items::delete_item(&state.pool, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/items/{id}/tags` + `{ "tag_ids": [1, 2] }` → 갱신된 항목
pub async fn add_item_tags(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
    Json(req): Json<ItemTagsRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = items::add_item_tags(&state.pool, user.user_id, id, &req.tag_ids).await?;
    Ok(Json(item))
}

/// `DELETE /api/v1/items/{id}/tags` + `{ "tag_ids": [1] }` → 갱신된 항목
pub async fn remove_item_tags(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<i64>,
    Json(req): Json<ItemTagsRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = items::remove_item_tags(&state.pool, user.user_id, id, &req.tag_ids).await?;
    Ok(Json(item))
}
