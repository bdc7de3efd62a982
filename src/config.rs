//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST` / `PORT`: 서버 바인딩 주소와 포트
//! - `APP_ENV`: 실행 환경 이름 (dev, prod 등)
//! - `DEBUG`: `RUST_LOG`가 없을 때 debug 레벨 로그를 켤지 여부
//! - `DEFAULT_USER_ID`: `X-User-Id` 헤더가 없을 때 사용할 사용자 (`none`이면 비활성)
//! - `MAX_PAGE_LIMIT`: 목록 조회 `limit` 상한 (없으면 제한 없음)
//! - `SEED_DEMO_DATA`: 시작 시 데모 데이터 삽입 여부
//! - `DB_MAX_CONNECTIONS`: 연결 풀 크기

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/reading_list.db")
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub app_env: String,
    pub debug: bool,
    pub default_user_id: Option<i64>,
    pub max_page_limit: Option<u32>,
    pub seed_demo_data: bool,
    pub db_max_connections: u32,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`만 필수이며, 없으면 에러가 발생합니다.
    /// 나머지는 기본값이 있고, 파싱할 수 없는 값도 기본값으로 대체됩니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string()),
            debug: env::var("DEBUG").map(|v| parse_bool(&v)).unwrap_or(true),
            default_user_id: match env::var("DEFAULT_USER_ID") {
                Ok(v) => parse_default_user(&v),
                Err(_) => Some(1),
            },
            max_page_limit: env::var("MAX_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|limit| *limit > 0),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_default_user(value: &str) -> Option<i64> {
    value.trim().parse().ok().filter(|id| *id > 0)
}
