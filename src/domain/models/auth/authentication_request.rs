use crate::domain::models::token::{TokenPair, UserPayload};

/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 인증이 선택사항임 (실패하면 익명으로 진행)
    Optional,
}

/// 요청 헤더에서 확인된 주체
///
/// 액세스 토큰이 그대로 유효했다면 `refreshed`는 `None`,
/// 리프레시 토큰으로 재발급했다면 새 토큰 쌍이 담깁니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: UserPayload,
    pub refreshed: Option<TokenPair>,
}
