//! # 태그 서비스
//!
//! 태그 이름은 사용자별로 유일합니다. 생성/이름 변경 전에 같은 이름을 먼저 찾아보고,
//! 동시에 들어온 요청이 사전 검사를 함께 통과하더라도 DB 유일 제약이
//! `AppError::Conflict`로 막습니다.

use crate::{
    db,
    error::AppError,
    models::*,
    services::{validate_text, MAX_TAG_NAME_LENGTH},
};
use sqlx::SqlitePool;

pub async fn list_tags(pool: &SqlitePool, user_id: i64) -> Result<Vec<Tag>, AppError> {
    let mut conn = pool.acquire().await?;
    db::tags::list_tags(&mut conn, user_id).await
}

pub async fn get_tag(pool: &SqlitePool, user_id: i64, id: i64) -> Result<Tag, AppError> {
    let mut conn = pool.acquire().await?;
    db::tags::get_tag(&mut conn, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Tag"))
}

pub async fn create_tag(
    pool: &SqlitePool,
    user_id: i64,
    req: &CreateTagRequest,
) -> Result<Tag, AppError> {
    validate_text("name", &req.name, MAX_TAG_NAME_LENGTH)?;

    let mut tx = pool.begin().await?;
    if db::tags::find_by_name(&mut tx, user_id, &req.name).await?.is_some() {
        return Err(AppError::Conflict("Tag with this name already exists".to_string()));
    }

    let tag = db::tags::insert_tag(&mut tx, user_id, &req.name).await?;
    tx.commit().await?;

    tracing::info!(user_id, tag_id = tag.id, "tag created");
    Ok(tag)
}

/// 태그 이름을 바꿉니다. `name`이 없으면 현재 상태를 그대로 돌려줍니다.
pub async fn update_tag(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    req: &UpdateTagRequest,
) -> Result<Tag, AppError> {
    let mut tx = pool.begin().await?;
    let tag = db::tags::get_tag(&mut tx, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Tag"))?;

    let Some(name) = &req.name else {
        return Ok(tag);
    };
    validate_text("name", name, MAX_TAG_NAME_LENGTH)?;

    if let Some(existing) = db::tags::find_by_name(&mut tx, user_id, name).await? {
        if existing.id != id {
            return Err(AppError::Conflict("Tag with this name already exists".to_string()));
        }
    }

    let tag = db::tags::rename_tag(&mut tx, user_id, id, name)
        .await?
        .ok_or(AppError::NotFound("Tag"))?;
    tx.commit().await?;

    tracing::info!(user_id, tag_id = id, "tag renamed");
    Ok(tag)
}

/// 태그를 삭제하고 삭제한 ID를 돌려줍니다. 연결된 항목은 남고 연결만 해제됩니다.
pub async fn delete_tag(pool: &SqlitePool, user_id: i64, id: i64) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;
    if !db::tags::delete_tag(&mut tx, user_id, id).await? {
        return Err(AppError::NotFound("Tag"));
    }
    tx.commit().await?;

    tracing::info!(user_id, tag_id = id, "tag deleted");
    Ok(id)
}
