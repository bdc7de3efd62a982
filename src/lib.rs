//! # 읽기 목록(reading list) 백엔드
//!
//! 사용자별 책/아티클 항목과 태그를 관리하는 REST API입니다.
//!
//! 계층 구조:
//! - `routes`: HTTP 경계. 추출자로 입력을 받고 서비스 결과를 JSON으로 돌려줌
//! - `services`: 요청 하나당 트랜잭션 하나. 검증, 소유권, 유일성 확인
//! - `db`: SQLite 접근. 필터 목록 쿼리(`db::item_query`)가 핵심
//! - `models`: 엔티티와 요청/응답 구조체
//!
//! `main.rs`와 통합 테스트가 모두 [`build_app`]으로 같은 라우터를 만듭니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use middleware::MakeRequestUuidV7;
use routes::{health, items, tags, users, AppState};

/// 전체 라우터를 조립합니다.
///
/// `/health`는 최상위에, 나머지 API는 `/api/v1` 아래에 둡니다.
pub fn build_app(state: AppState) -> Router {
    let api_routes = Router::new()
        // 사용자
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // 태그
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag)
                .patch(tags::update_tag)
                .delete(tags::delete_tag),
        )
        // 항목
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{id}",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route(
            "/items/{id}/tags",
            post(items::add_item_tags).delete(items::remove_item_tags),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 나중에 추가한 레이어가 바깥쪽입니다. x-request-id를 먼저 붙여야
    // TraceLayer와 응답 전파 레이어가 그 값을 봅니다.
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
