//! # 태그 모델 정의
//!
//! 태그는 사용자 소유의 라벨입니다. 같은 사용자 안에서 이름이 유일해야 하며
//! (`uq_tags_user_id_name`), 항목(Item)과 다대다로 연결됩니다.
//!
//! ## 구조체 역할
//! - `Tag`: `tags` 테이블 한 행 (응답용)
//! - `CreateTagRequest`: `POST /api/v1/tags` 요청 본문
//! - `UpdateTagRequest`: `PATCH /api/v1/tags/{id}` 요청 본문
//! - `ItemTagsRequest`: 항목에 태그를 붙이거나 뗄 때 쓰는 본문

use serde::{Deserialize, Serialize};

/// 태그 엔티티 — DB의 `tags` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    /// 소유자 사용자 ID
    pub user_id: i64,
    pub name: String,
    pub created_at: String,
}

/// 태그 생성 요청
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// 태그 수정 요청
///
/// 수정 가능한 필드가 이름 하나뿐이지만 PATCH 관례대로 Option으로 둡니다.
/// 빈 본문 `{}`은 아무것도 바꾸지 않습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
}

/// `POST|DELETE /api/v1/items/{id}/tags`의 요청 본문
#[derive(Debug, Clone, Deserialize)]
pub struct ItemTagsRequest {
    pub tag_ids: Vec<i64>,
}
