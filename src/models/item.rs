//! # 읽기 항목(Item) 모델
//!
//! 책/아티클 한 건을 나타내는 `Item`과 그 주변 타입들입니다.
//!
//! - 열거형 `ItemKind`, `ItemStatus`, `ItemPriority`는 DB에 소문자 TEXT로 저장되고
//!   JSON/쿼리스트링에서도 같은 소문자 문자열을 사용합니다.
//! - `ItemFilter`는 목록 조회(`GET /api/v1/items`)의 쿼리 파라미터이며,
//!   `db::item_query`가 이를 SQL로 옮깁니다.
//! - `ItemPatch`는 PATCH 본문으로, 들어온 필드만 `apply_to`로 병합합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::double_option;

/// 항목 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemKind {
    Book,
    Article,
}

/// 읽기 상태
///
/// 상태 전이 규칙은 없습니다. 어떤 상태에서든 다른 어떤 상태로든 바꿀 수 있습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Planned,
    Reading,
    Done,
}

/// 우선순위
///
/// variant 선언 순서가 곧 정렬 순서입니다 (`Low < Normal < High`).
/// DB에서는 문자열이므로 정렬 시 `db::item_query`가 같은 순서의 랭크로 변환합니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// 항목 엔티티 — `items` 테이블 한 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub kind: ItemKind,
    pub status: ItemStatus,
    pub priority: ItemPriority,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// API 응답용 항목 표현: 엔티티 필드 + 연결된 태그 ID 목록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    #[serde(flatten)]
    pub item: Item,
    /// 오름차순으로 정렬된 태그 ID
    pub tag_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub priority: ItemPriority,
    pub notes: Option<String>,
    /// 생성과 동시에 연결할 태그. 모두 요청자 소유여야 합니다.
    pub tag_ids: Option<Vec<i64>>,
}

/// 항목 부분 수정 본문
///
/// - `notes`: 누락 = 유지, `null` = 비우기
/// - `tag_ids`: 누락(또는 null) = 태그 유지, `[]` = 모두 해제, `[..]` = 전체 교체
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub kind: Option<ItemKind>,
    pub status: Option<ItemStatus>,
    pub priority: Option<ItemPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub tag_ids: Option<Vec<i64>>,
}

impl ItemPatch {
    /// 엔티티 컬럼에 해당하는 필드만 병합합니다. `tag_ids`는 호출자가 따로 처리합니다.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(notes) = &self.notes {
            item.notes = notes.clone();
        }
    }
}

/// 정렬 기준 컬럼
///
/// 알 수 없는 값은 거부하지 않고 `created_at`으로 대체합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Priority,
}

impl From<String> for SortBy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "updated_at" => SortBy::UpdatedAt,
            "priority" => SortBy::Priority,
            _ => SortBy::CreatedAt,
        }
    }
}

/// 정렬 방향. 알 수 없는 값은 `desc`로 대체합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl From<String> for SortDir {
    fn from(value: String) -> Self {
        match value.as_str() {
            "asc" => SortDir::Asc,
            _ => SortDir::Desc,
        }
    }
}

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// 목록 조회 필터 — `GET /api/v1/items?status=reading&tag_ids=1&tag_ids=2&...`
///
/// 모든 필드는 선택이며, 빠진 필드는 해당 조건을 걸지 않습니다.
/// `tag_ids`는 OR 조건(하나라도 가진 항목)입니다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub kind: Option<ItemKind>,
    pub priority: Option<ItemPriority>,
    pub tag_ids: Vec<i64>,
    /// 제목 부분 일치 검색어 (대소문자 무시)
    pub q: Option<String>,
    /// 생성일 하한 (포함)
    pub created_from: Option<DateTime<Utc>>,
    /// 생성일 상한 (포함)
    pub created_to: Option<DateTime<Utc>>,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            status: None,
            kind: None,
            priority: None,
            tag_ids: Vec::new(),
            q: None,
            created_from: None,
            created_to: None,
            sort_by: SortBy::default(),
            sort_dir: SortDir::default(),
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl ItemFilter {
    /// 비어 있는 검색어는 조건 없음으로 취급합니다.
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// 페이지 응답: `{ items, total, limit, offset }`
///
/// `total`은 페이지네이션 이전, 필터만 적용한 항목 수입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<ItemResponse>,
    pub total: i64,
    pub limit: u32,
    pub offset: u32,
}
