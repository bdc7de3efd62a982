//! # 서비스(비즈니스 로직) 모듈
//!
//! 라우트 핸들러와 DB 계층 사이에서 엔티티별 작업 흐름을 담당합니다.
//!
//! 모든 작업은 요청 하나당 트랜잭션 하나로 실행됩니다:
//! 검증(유일성 사전 검사, 태그 소유 확인) → 조회/변경 → 커밋.
//! 중간에 에러가 나면 `Transaction`이 drop되면서 롤백되므로 부분 쓰기가 남지 않습니다.
//!
//! 태그와 항목 함수는 모두 요청자 ID(`user_id`)를 명시적으로 받습니다.
//!
//! - `users`: 사용자 CRUD, 이메일 유일성
//! - `tags`: 태그 CRUD, 사용자별 이름 유일성
//! - `items`: 항목 CRUD, 태그 연결 검증, 목록 조회

pub mod items;
pub mod tags;
pub mod users;

use crate::error::AppError;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_TAG_NAME_LENGTH: usize = 50;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 255;

/// 공백만 있는 값과 최대 길이(문자 수) 초과를 거부합니다.
pub(crate) fn validate_text(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    validate_text("email", email, 255)
}
