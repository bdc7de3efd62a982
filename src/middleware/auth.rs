//! 요청자 식별 (`X-User-Id`)
//!
//! 인증은 하지 않습니다. 헤더 값은 그대로 신뢰하고, 이후 모든 태그/항목 작업이
//! 이 ID로 범위가 제한됩니다.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, routes::AppState};

pub const USER_ID_HEADER: &str = "x-user-id";

/// 요청을 보낸 사용자.
///
/// - 헤더 없음: 설정된 기본 사용자, 기본 사용자가 없으면 401
/// - 숫자가 아니거나 0 이하: 400
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return state
                .default_user_id
                .map(|user_id| ActingUser { user_id })
                .ok_or_else(|| AppError::Unauthorized("X-User-Id header is required".to_string()));
        };

        let user_id = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| AppError::Validation("X-User-Id must be an integer".to_string()))?;

        if user_id <= 0 {
            return Err(AppError::Validation(
                "X-User-Id must be positive integer".to_string(),
            ));
        }

        Ok(ActingUser { user_id })
    }
}
