//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 핸들러는 추출자로 입력을 받고, 서비스 계층을 호출한 뒤 결과를 JSON으로 돌려줍니다.
//! 에러는 `AppError`가 `IntoResponse`로 상태 코드와 본문을 결정합니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `users`: 사용자 CRUD
//! - `tags`: 태그 CRUD
//! - `items`: 항목 CRUD, 필터 목록, 태그 연결/해제

pub mod health;
pub mod items;
pub mod tags;
pub mod users;

use sqlx::SqlitePool;

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// `SqlitePool`은 내부적으로 `Arc`이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// `X-User-Id` 헤더가 없을 때 사용할 사용자
    pub default_user_id: Option<i64>,
    /// 목록 조회 `limit` 상한
    pub max_page_limit: Option<u32>,
}
