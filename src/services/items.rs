//! # 항목 서비스
//!
//! 항목 CRUD와 태그 연결, 필터 목록 조회를 담당합니다.
//!
//! ## 태그 참조 규칙
//! 항목에 붙이는 태그는 모두 요청자 소유여야 합니다. 하나라도 없거나 다른 사용자의
//! 것이면 아무것도 쓰지 않고 `AppError::MissingTags`(문제 ID 목록)로 실패합니다.
//! 검증은 항상 첫 쓰기 전에 끝나므로 부분 적용이 생기지 않습니다.

use std::collections::BTreeSet;

use crate::{
    db::{self, item_query::ItemQuery},
    error::AppError,
    models::*,
    services::{validate_text, MAX_TITLE_LENGTH},
};
use sqlx::{SqliteConnection, SqlitePool};

/// 요청한 태그 ID를 중복 제거·정렬하고, 모두 `user_id` 소유인지 확인합니다.
async fn ensure_tags_owned(
    conn: &mut SqliteConnection,
    user_id: i64,
    tag_ids: &[i64],
) -> Result<Vec<i64>, AppError> {
    let requested: BTreeSet<i64> = tag_ids.iter().copied().collect();
    let requested: Vec<i64> = requested.into_iter().collect();

    let found: BTreeSet<i64> = db::tags::owned_tag_ids(conn, user_id, &requested)
        .await?
        .into_iter()
        .collect();

    let missing: Vec<i64> = requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::MissingTags(missing));
    }

    Ok(requested)
}

async fn to_response(conn: &mut SqliteConnection, item: Item) -> Result<ItemResponse, AppError> {
    let tag_ids = db::items::tag_ids_for_item(conn, item.id).await?;
    Ok(ItemResponse { item, tag_ids })
}

/// 필터에 맞는 항목 페이지와 전체 개수
///
/// `max_limit`이 있으면 `limit`을 그 값으로 자르고, 응답에는 실제 적용한 값을 넣습니다.
pub async fn list_items(
    pool: &SqlitePool,
    user_id: i64,
    mut filter: ItemFilter,
    max_limit: Option<u32>,
) -> Result<ItemPage, AppError> {
    if let Some(cap) = max_limit {
        filter.limit = filter.limit.min(cap);
    }

    // 개수와 페이지를 같은 스냅샷에서 읽습니다.
    let mut tx = pool.begin().await?;
    let query = ItemQuery::new(user_id, &filter);
    let total = query.count(&mut tx).await?;
    let items = query.fetch_page(&mut tx).await?;

    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    let mut tags = db::items::tag_ids_for_items(&mut tx, &ids).await?;
    tx.commit().await?;

    let items = items
        .into_iter()
        .map(|item| {
            let tag_ids = tags.remove(&item.id).unwrap_or_default();
            ItemResponse { item, tag_ids }
        })
        .collect();

    tracing::debug!(user_id, total, "items listed");
    Ok(ItemPage {
        items,
        total,
        limit: filter.limit,
        offset: filter.offset,
    })
}

pub async fn get_item(pool: &SqlitePool, user_id: i64, id: i64) -> Result<ItemResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let item = db::items::get_item(&mut conn, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;
    to_response(&mut conn, item).await
}

pub async fn create_item(
    pool: &SqlitePool,
    user_id: i64,
    req: &CreateItemRequest,
) -> Result<ItemResponse, AppError> {
    validate_text("title", &req.title, MAX_TITLE_LENGTH)?;

    let mut tx = pool.begin().await?;

    let tag_ids = match &req.tag_ids {
        Some(ids) => ensure_tags_owned(&mut tx, user_id, ids).await?,
        None => Vec::new(),
    };

    let item = db::items::insert_item(&mut tx, user_id, req).await?;
    db::items::add_item_tags(&mut tx, item.id, &tag_ids).await?;
    tx.commit().await?;

    tracing::info!(user_id, item_id = item.id, tags = tag_ids.len(), "item created");
    Ok(ItemResponse { item, tag_ids })
}

/// 부분 수정. 들어온 필드만 반영하고 `tag_ids`가 있으면 태그 집합을 통째로 교체합니다.
pub async fn update_item(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    patch: &ItemPatch,
) -> Result<ItemResponse, AppError> {
    if let Some(title) = &patch.title {
        validate_text("title", title, MAX_TITLE_LENGTH)?;
    }

    let mut tx = pool.begin().await?;
    let mut item = db::items::get_item(&mut tx, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    let tag_ids = match &patch.tag_ids {
        Some(ids) => Some(ensure_tags_owned(&mut tx, user_id, ids).await?),
        None => None,
    };

    patch.apply_to(&mut item);
    let item = db::items::update_item(&mut tx, &item).await?;
    if let Some(tag_ids) = &tag_ids {
        db::items::replace_item_tags(&mut tx, item.id, tag_ids).await?;
    }

    let response = to_response(&mut tx, item).await?;
    tx.commit().await?;

    tracing::info!(user_id, item_id = id, "item updated");
    Ok(response)
}

/// 항목을 삭제하고 삭제한 ID를 돌려줍니다.
pub async fn delete_item(pool: &SqlitePool, user_id: i64, id: i64) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;
    if !db::items::delete_item(&mut tx, user_id, id).await? {
        return Err(AppError::NotFound("Item"));
    }
    tx.commit().await?;

    tracing::info!(user_id, item_id = id, "item deleted");
    Ok(id)
}

/// 기존 태그는 유지한 채 태그를 더 붙입니다. 이미 붙어 있는 ID는 무시합니다.
pub async fn add_item_tags(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    tag_ids: &[i64],
) -> Result<ItemResponse, AppError> {
    let mut tx = pool.begin().await?;
    let item = db::items::get_item(&mut tx, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    if tag_ids.is_empty() {
        return to_response(&mut tx, item).await;
    }

    let tag_ids = ensure_tags_owned(&mut tx, user_id, tag_ids).await?;
    db::items::add_item_tags(&mut tx, item.id, &tag_ids).await?;
    db::items::touch_item(&mut tx, item.id).await?;

    let item = db::items::get_item(&mut tx, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;
    let response = to_response(&mut tx, item).await?;
    tx.commit().await?;

    tracing::info!(user_id, item_id = id, "item tags added");
    Ok(response)
}

/// 지정한 태그 연결만 해제합니다. 빈 목록이면 아무것도 바꾸지 않고 현재 상태를 돌려줍니다.
///
/// 항목에 붙어 있지 않은 ID는 조용히 무시합니다.
pub async fn remove_item_tags(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    tag_ids: &[i64],
) -> Result<ItemResponse, AppError> {
    let mut tx = pool.begin().await?;
    let mut item = db::items::get_item(&mut tx, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    if db::items::remove_item_tags(&mut tx, item.id, tag_ids).await? > 0 {
        db::items::touch_item(&mut tx, item.id).await?;
        item = db::items::get_item(&mut tx, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Item"))?;
        tracing::info!(user_id, item_id = id, "item tags removed");
    }

    let response = to_response(&mut tx, item).await?;
    tx.commit().await?;
    Ok(response)
}
