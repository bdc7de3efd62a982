//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD 쿼리 함수들입니다. 모든 조회/수정/삭제는 `user_id` 조건을 함께 걸어
//! 요청자 소유의 행만 보이게 합니다. 다른 사용자의 태그는 "없는 것"과 구별되지 않습니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, user_id, name, created_at), `(user_id, name)` 유일
//! - `item_tags`: 항목과 태그의 다대다(N:M) 관계 테이블 (`items` 모듈에서 관리)

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// 사용자의 모든 태그를 이름순으로 조회합니다.
pub async fn list_tags(conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name, created_at FROM tags WHERE user_id = ? ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다. 소유자가 다르면 `None`입니다.
pub async fn get_tag(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: i64,
) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name, created_at FROM tags WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(tag)
}

pub async fn find_by_name(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, user_id, name, created_at FROM tags WHERE user_id = ? AND name = ?",
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(tag)
}

/// 주어진 ID 중 실제로 `user_id` 소유인 태그 ID만 돌려줍니다.
///
/// 호출자는 요청한 ID와 결과를 비교해 누락된(없거나 남의) ID를 찾아냅니다.
/// `IN (?, ?, ...)` 목록은 `QueryBuilder::separated`로 ID 개수만큼 바인딩합니다.
pub async fn owned_tag_ids(
    conn: &mut SqliteConnection,
    user_id: i64,
    ids: &[i64],
) -> Result<Vec<i64>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM tags WHERE user_id = ");
    qb.push_bind(user_id);
    qb.push(" AND id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id");

    let rows: Vec<(i64,)> = qb.build_query_as::<(i64,)>().fetch_all(&mut *conn).await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 새 태그를 생성합니다.
///
/// 같은 이름의 태그가 동시에 만들어지면 유일 제약에 걸려 `AppError::Conflict`가 됩니다.
pub async fn insert_tag(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<Tag, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (user_id, name)
        VALUES (?, ?)
        RETURNING id, user_id, name, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(tag)
}

pub async fn rename_tag(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: i64,
    name: &str,
) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tags SET name = ?
        WHERE id = ? AND user_id = ?
        RETURNING id, user_id, name, created_at
        "#,
    )
    .bind(name)
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(tag)
}

/// 태그를 삭제합니다.
///
/// `item_tags`에 `ON DELETE CASCADE`가 걸려 있어 연결만 사라지고 항목은 남습니다.
pub async fn delete_tag(conn: &mut SqliteConnection, user_id: i64, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
