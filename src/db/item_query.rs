//! # 항목 목록 쿼리 빌더
//!
//! `ItemFilter`를 SQL로 옮겨 (페이지, 전체 개수) 쌍을 만듭니다.
//!
//! ## 쿼리 구성 순서
//! 1. 기본 조건: `i.user_id = 요청자`
//! 2. 값이 있는 조건을 AND로 연결: status, kind, priority, 제목 검색(q), 생성일 범위
//! 3. `tag_ids`가 비어 있지 않으면 `item_tags`를 JOIN하고 `it.tag_id IN (...)` 추가.
//!    태그가 여러 개 일치하면 같은 항목이 여러 행으로 나오므로 항목 ID로 중복을 제거합니다.
//! 4. 전체 개수: 같은 FROM/JOIN/WHERE 조각으로 `COUNT(DISTINCT i.id)`
//! 5. 정렬: `sort_by` 컬럼 + `sort_dir` 방향 (동률 처리 규칙 없음)
//! 6. `LIMIT ? OFFSET ?`
//!
//! 개수 쿼리와 페이지 쿼리는 `push_scope`가 만드는 동일한 조각을 공유하므로,
//! `total`은 항상 페이지네이션 전 필터 결과의 서로 다른 항목 수와 같습니다.
//!
//! ```sql
//! SELECT i.* FROM items i
//! JOIN item_tags it ON it.item_id = i.id      -- tag_ids가 있을 때만
//! WHERE i.user_id = ? AND i.status = ? AND it.tag_id IN (?, ?)
//! GROUP BY i.id                               -- JOIN이 있을 때만
//! ORDER BY i.created_at DESC
//! LIMIT ? OFFSET ?
//! ```

use crate::db::format_timestamp;
use crate::error::AppError;
use crate::models::*;
use chrono::{DateTime, Duration, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// priority 문자열을 선언 순서(low < normal < high)의 숫자로 바꾸는 정렬 식
const PRIORITY_RANK_SQL: &str =
    "CASE i.priority WHEN 'low' THEN 0 WHEN 'normal' THEN 1 WHEN 'high' THEN 2 END";

/// 밀리초 미만 값이 있으면 다음 밀리초로 올립니다.
fn ceil_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    let rem = ts.timestamp_subsec_nanos() % 1_000_000;
    if rem == 0 {
        ts
    } else {
        ts + Duration::nanoseconds(i64::from(1_000_000 - rem))
    }
}

/// 한 사용자의 항목에 대한 필터 쿼리
#[derive(Debug, Clone, Copy)]
pub struct ItemQuery<'a> {
    user_id: i64,
    filter: &'a ItemFilter,
}

impl<'a> ItemQuery<'a> {
    pub fn new(user_id: i64, filter: &'a ItemFilter) -> Self {
        Self { user_id, filter }
    }

    fn joins_tags(&self) -> bool {
        !self.filter.tag_ids.is_empty()
    }

    /// FROM / JOIN / WHERE 조각. 개수 쿼리와 페이지 쿼리가 그대로 공유합니다.
    fn push_scope(&self, qb: &mut QueryBuilder<'a, Sqlite>) {
        let filter = self.filter;

        qb.push(" FROM items i");
        if self.joins_tags() {
            qb.push(" JOIN item_tags it ON it.item_id = i.id");
        }

        qb.push(" WHERE i.user_id = ").push_bind(self.user_id);

        if let Some(status) = filter.status {
            qb.push(" AND i.status = ").push_bind(status);
        }
        if let Some(kind) = filter.kind {
            qb.push(" AND i.kind = ").push_bind(kind);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND i.priority = ").push_bind(priority);
        }

        // 소문자로 저장한 `title_search`와 비교하므로 비ASCII 제목도 대소문자를 무시합니다.
        // 사용자 입력의 `%`, `_`는 이스케이프하지 않으므로 패턴 문자로 동작합니다.
        if let Some(q) = filter.search_term() {
            qb.push(" AND i.title_search LIKE ")
                .push_bind(format!("%{}%", q.to_lowercase()));
        }

        // 저장 값은 밀리초 단위입니다. 하한은 올림, 상한은 버림해야 포함 범위가 정확합니다.
        if let Some(from) = &filter.created_from {
            qb.push(" AND i.created_at >= ")
                .push_bind(format_timestamp(&ceil_to_millis(*from)));
        }
        if let Some(to) = &filter.created_to {
            qb.push(" AND i.created_at <= ").push_bind(format_timestamp(to));
        }

        if self.joins_tags() {
            qb.push(" AND it.tag_id IN (");
            let mut separated = qb.separated(", ");
            for tag_id in &filter.tag_ids {
                separated.push_bind(*tag_id);
            }
            separated.push_unseparated(")");
        }
    }

    fn push_order(&self, qb: &mut QueryBuilder<'a, Sqlite>) {
        let column = match self.filter.sort_by {
            SortBy::CreatedAt => "i.created_at",
            SortBy::UpdatedAt => "i.updated_at",
            SortBy::Priority => PRIORITY_RANK_SQL,
        };
        let direction = match self.filter.sort_dir {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        };
        qb.push(" ORDER BY ").push(column).push(" ").push(direction);
    }

    /// 페이지네이션 전, 필터에 맞는 서로 다른 항목의 수
    pub async fn count(&self, conn: &mut SqliteConnection) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(DISTINCT i.id)");
        self.push_scope(&mut qb);

        let (total,): (i64,) = qb.build_query_as::<(i64,)>().fetch_one(&mut *conn).await?;
        Ok(total)
    }

    /// 정렬과 `limit`/`offset`을 적용한 항목 페이지
    pub async fn fetch_page(&self, conn: &mut SqliteConnection) -> Result<Vec<Item>, AppError> {
        let mut qb = QueryBuilder::new(
            "SELECT i.id, i.user_id, i.title, i.kind, i.status, i.priority, i.notes, \
             i.created_at, i.updated_at",
        );
        self.push_scope(&mut qb);

        // JOIN으로 늘어난 행을 항목 ID 기준으로 하나씩만 남깁니다.
        if self.joins_tags() {
            qb.push(" GROUP BY i.id");
        }

        self.push_order(&mut qb);

        qb.push(" LIMIT ")
            .push_bind(i64::from(self.filter.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(self.filter.offset));

        let items = qb.build_query_as::<Item>().fetch_all(&mut *conn).await?;
        Ok(items)
    }
}
