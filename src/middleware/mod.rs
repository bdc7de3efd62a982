//! # 요청 미들웨어/추출자
//!
//! - `auth`: `X-User-Id` 헤더에서 요청자를 꺼내는 `ActingUser` 추출자
//! - `request_id`: `x-request-id` 생성기

pub mod auth;
pub mod request_id;

pub use auth::ActingUser;
pub use request_id::MakeRequestUuidV7;
