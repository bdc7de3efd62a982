use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// 요청마다 UUIDv7 `x-request-id`를 만듭니다. 시간순으로 정렬되어 로그 추적이 쉽습니다.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}
