//! # 읽기 목록 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션 실행
//! 4. (선택) 데모 데이터 삽입
//! 5. HTTP 서버 시작
//!
//! 라우터 조립은 `reading_list::build_app`이 맡습니다.

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use reading_list::{build_app, config::Config, db, routes::AppState};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 설정 로딩 ──
    // 로그 기본 레벨이 DEBUG 설정에 달려 있어서 로깅보다 먼저 읽습니다.
    let config = Config::from_env()?;

    // ── 3단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 있으면 그 값을, 없으면 DEBUG 설정에 따라 debug/info 레벨을 씁니다.
    let default_filter = if config.debug {
        "reading_list=debug,tower_http=debug,axum=debug"
    } else {
        "reading_list=info,tower_http=info,axum=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        env = %config.app_env,
        "Starting reading list server on {}:{}",
        config.host,
        config.port
    );

    // ── 4단계: DB 파일 디렉토리 생성 ──
    // "sqlite:data/reading_list.db" → data/ 가 없으면 SQLite가 파일을 만들지 못합니다.
    if let Some(parent) = sqlite_file_path(&config.database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    // ── 5단계: 연결 풀 생성 + 마이그레이션 ──
    tracing::info!("Connecting to database and running migrations...");
    let pool = db::connect(&config.database_url, config.db_max_connections).await?;

    // ── 6단계: 데모 데이터 (SEED_DEMO_DATA=true) ──
    if config.seed_demo_data {
        db::seed::seed_demo_data(&pool).await?;
    }

    // ── 7단계: 애플리케이션 상태와 라우터 ──
    let state = AppState {
        pool,
        default_user_id: config.default_user_id,
        max_page_limit: config.max_page_limit,
    };
    match state.default_user_id {
        Some(id) => tracing::info!("Requests without X-User-Id act as user {}", id),
        None => tracing::info!("X-User-Id header is required"),
    }
    let app = build_app(state);

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `sqlite:` URL에서 파일 경로를 꺼냅니다. 인메모리 DB면 `None`.
fn sqlite_file_path(url: &str) -> Option<&Path> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(Path::new(path))
}
