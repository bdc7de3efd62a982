//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `From<sqlx::Error>`: DB 제약 조건 위반을 `Conflict`/`Validation`으로 재분류
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 경계 계층(라우트)은 메시지 문자열을 보지 않고 variant만으로 상태 코드를 결정합니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
#[derive(Debug, Error)]
pub enum AppError {
    /// 리소스가 없거나 요청자 소유가 아님 (HTTP 404)
    ///
    /// 다른 사용자의 리소스도 "없음"으로 응답하여 존재 여부를 노출하지 않습니다.
    /// 필드는 엔티티 이름입니다 ("Item", "Tag", "User").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 구조적으로 잘못된 입력 (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// 참조한 태그 중 존재하지 않거나 다른 사용자 소유인 ID (HTTP 400)
    #[error("Tags not found or do not belong to user: {0:?}")]
    MissingTags(Vec<i64>),

    /// 유일성 위반 등 리소스 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 요청자를 식별할 수 없음 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 분류되지 않은 데이터베이스 오류 (HTTP 500)
    ///
    /// 제약 조건 위반은 아래 `From` 구현에서 먼저 걸러지므로
    /// 여기에는 I/O, 연결, 문법 오류 같은 것만 남습니다.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

// #[from] 대신 직접 구현하는 이유: 같은 sqlx::Error라도
// 유일성/외래키 위반은 409, CHECK 위반은 400으로 보내야 합니다.
// 동시 요청이 사전 검사를 통과한 뒤 커밋 시점에 제약에 걸리는 경우도 여기서 처리됩니다.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict("Resource already exists".to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Conflict("Referenced resource does not exist".to_string());
            }
            if db_err.is_check_violation() {
                return AppError::Validation(db_err.message().to_string());
            }
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 결과: `{ "error": { "code": "...", "message": "..." } }`
    /// 내부 에러(Database)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::MissingTags(ref ids) => {
                let body = Json(json!({
                    "error": {
                        "code": "validation_error",
                        "message": self.to_string(),
                        "tag_ids": ids,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal service error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
