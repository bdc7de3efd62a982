//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! SQLite와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)이 트랜잭션을 열고, 이 모듈의 함수에
//! `&mut SqliteConnection`(트랜잭션 포함)을 넘겨 호출합니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자 조회/삽입/수정/삭제
//! - `tags`: 태그 CRUD (모두 소유자 ID로 범위 제한)
//! - `items`: 항목 CRUD와 항목-태그 연결 테이블
//! - `item_query`: 필터/정렬/페이지네이션 쿼리 빌더
//! - `seed`: 데모 데이터

pub mod item_query;
pub mod items;
pub mod seed;
pub mod tags;
pub mod users;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// `./migrations`의 SQL 파일을 컴파일 타임에 바이너리에 포함합니다.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// DB에 저장되는 타임스탬프 형식. 스키마의 `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`와 같습니다.
/// 고정 폭이라 문자열 비교가 곧 시간 비교입니다.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// SQL에서 현재 시각을 만드는 식
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// 연결 풀을 만들고 마이그레이션을 실행합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// 테스트용 인메모리 DB.
///
/// `:memory:` DB는 연결마다 따로 생기므로 연결을 하나로 고정하고 닫히지 않게 합니다.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
