//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `user`: 사용자(User)와 생성/수정 요청
//! - `tag`: 태그(Tag)와 생성/수정 요청
//! - `item`: 읽기 항목(Item), 열거형(kind/status/priority), 필터와 페이지 응답
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Item`처럼 짧게 접근합니다.

pub mod item;
pub mod tag;
pub mod user;

pub use item::*;
pub use tag::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// PATCH 본문에서 "필드 누락"과 "명시적 null"을 구분하기 위한 역직렬화 함수
///
/// `#[serde(default, deserialize_with = "double_option")]`와 함께 사용합니다.
/// - 필드 누락 → `None` (default가 채움, 변경 안 함)
/// - `null` → `Some(None)` (값을 비움)
/// - 값 → `Some(Some(v))`
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
