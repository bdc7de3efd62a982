//! # 항목(Item) 데이터베이스 쿼리 모듈
//!
//! `items` 테이블과 `item_tags` 연결 테이블에 대한 CRUD 쿼리 함수들입니다.
//! 필터/정렬/페이지네이션이 들어가는 목록 조회는 `item_query` 모듈에 있습니다.
//!
//! 모든 단건 조회/수정/삭제는 `user_id`를 함께 받아 소유자 범위로 제한합니다.
//! `item_tags`의 태그가 같은 사용자 소유인지는 서비스 계층이 쓰기 전에 검증합니다.

use std::collections::HashMap;

use crate::db::NOW_SQL;
use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

const ITEM_COLUMNS: &str =
    "id, user_id, title, kind, status, priority, notes, created_at, updated_at";

/// 요청자 소유의 항목 하나를 조회합니다.
///
/// - `Ok(Some(Item))`: 찾은 경우
/// - `Ok(None)`: 없거나 다른 사용자의 항목
pub async fn get_item(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: i64,
) -> Result<Option<Item>, AppError> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ? AND user_id = ?");
    let item = sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(item)
}

/// 새 항목을 삽입합니다. created_at/updated_at은 DB 기본값으로 채워집니다.
///
/// `title_search`에는 제목을 유니코드 소문자로 바꿔 함께 저장합니다.
pub async fn insert_item(
    conn: &mut SqliteConnection,
    user_id: i64,
    req: &CreateItemRequest,
) -> Result<Item, AppError> {
    let sql = format!(
        "INSERT INTO items (user_id, title, title_search, kind, status, priority, notes) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {ITEM_COLUMNS}"
    );
    let item = sqlx::query_as::<_, Item>(&sql)
        .bind(user_id)
        .bind(&req.title)
        .bind(req.title.to_lowercase())
        .bind(req.kind)
        .bind(req.status)
        .bind(req.priority)
        .bind(&req.notes)
        .fetch_one(&mut *conn)
        .await?;

    Ok(item)
}

/// 병합이 끝난 항목의 변경 가능한 컬럼을 저장하고 updated_at을 갱신합니다.
///
/// id, user_id, created_at은 쓰지 않습니다.
pub async fn update_item(conn: &mut SqliteConnection, item: &Item) -> Result<Item, AppError> {
    let sql = format!(
        "UPDATE items SET title = ?, title_search = ?, kind = ?, status = ?, priority = ?, notes = ?, \
         updated_at = {NOW_SQL} WHERE id = ? AND user_id = ? RETURNING {ITEM_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Item>(&sql)
        .bind(&item.title)
        .bind(item.title.to_lowercase())
        .bind(item.kind)
        .bind(item.status)
        .bind(item.priority)
        .bind(&item.notes)
        .bind(item.id)
        .bind(item.user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    Ok(updated)
}

/// 태그 연결만 바뀌었을 때 updated_at을 갱신합니다.
pub async fn touch_item(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    let sql = format!("UPDATE items SET updated_at = {NOW_SQL} WHERE id = ?");
    sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
    Ok(())
}

/// 항목을 삭제합니다. `item_tags` 행은 CASCADE로 함께 지워집니다.
pub async fn delete_item(conn: &mut SqliteConnection, user_id: i64, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM items WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 항목 하나의 태그 ID 목록 (오름차순)
pub async fn tag_ids_for_item(conn: &mut SqliteConnection, item_id: i64) -> Result<Vec<i64>, AppError> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT tag_id FROM item_tags WHERE item_id = ? ORDER BY tag_id")
            .bind(item_id)
            .fetch_all(&mut *conn)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 여러 항목의 태그 ID를 한 번의 쿼리로 가져옵니다.
///
/// 페이지의 항목마다 따로 조회하지 않기 위한 함수입니다 (N+1 쿼리 방지).
/// 태그가 없는 항목은 맵에 키가 없습니다.
pub async fn tag_ids_for_items(
    conn: &mut SqliteConnection,
    item_ids: &[i64],
) -> Result<HashMap<i64, Vec<i64>>, AppError> {
    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    if item_ids.is_empty() {
        return Ok(map);
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT item_id, tag_id FROM item_tags WHERE item_id IN (");
    let mut separated = qb.separated(", ");
    for id in item_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY item_id, tag_id");

    let rows: Vec<(i64, i64)> = qb
        .build_query_as::<(i64, i64)>()
        .fetch_all(&mut *conn)
        .await?;

    for (item_id, tag_id) in rows {
        map.entry(item_id).or_default().push(tag_id);
    }
    Ok(map)
}

/// 태그 연결을 추가합니다. 이미 연결된 쌍은 `INSERT OR IGNORE`로 건너뜁니다.
pub async fn add_item_tags(
    conn: &mut SqliteConnection,
    item_id: i64,
    tag_ids: &[i64],
) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT OR IGNORE INTO item_tags (item_id, tag_id) ");
    qb.push_values(tag_ids, |mut row, tag_id| {
        row.push_bind(item_id).push_bind(*tag_id);
    });
    qb.build().execute(&mut *conn).await?;

    Ok(())
}

/// 태그 집합 전체를 교체합니다. 빈 슬라이스면 모든 연결을 해제합니다.
pub async fn replace_item_tags(
    conn: &mut SqliteConnection,
    item_id: i64,
    tag_ids: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM item_tags WHERE item_id = ?")
        .bind(item_id)
        .execute(&mut *conn)
        .await?;

    add_item_tags(conn, item_id, tag_ids).await
}

/// 지정한 태그 연결만 해제하고, 실제로 지워진 행 수를 돌려줍니다.
pub async fn remove_item_tags(
    conn: &mut SqliteConnection,
    item_id: i64,
    tag_ids: &[i64],
) -> Result<u64, AppError> {
    if tag_ids.is_empty() {
        return Ok(0);
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("DELETE FROM item_tags WHERE item_id = ");
    qb.push_bind(item_id);
    qb.push(" AND tag_id IN (");
    let mut separated = qb.separated(", ");
    for id in tag_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = qb.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
