//! 토큰 수명주기 에러 분류
//!
//! 토큰 발급/검증/갱신 경로에서 발생하는 실패를 값으로 표현합니다.
//! 게이트웨이는 이 분류를 보고 익명 처리, 거부, 재시도 중 하나를 선택합니다.

use thiserror::Error;

/// 토큰 관리자에서 발생하는 실패 유형
///
/// 같은 입력에 대해서는 항상 같은 변형이 반환됩니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 액세스 토큰이 전달되지 않음 (익명 요청)
    #[error("missing token")]
    MissingToken,

    /// 액세스 토큰이 만료되었거나 형식/서명이 잘못됨
    #[error("expired or malformed access token: {0}")]
    ExpiredOrMalformedAccessToken(String),

    /// 토큰이 주장하는 사용자 ID가 저장소에 없음
    #[error("no matching user")]
    UnknownUser(i64),

    /// 리프레시 토큰 서명 불일치, 만료, 형식 오류
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// 사용자 저장소 조회 실패 또는 타임아웃
    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),

    /// 서명용 비밀값이 비어 있음
    #[error("{0} must not be empty")]
    InvalidSecret(&'static str),

    /// JWT 인코딩 실패
    #[error("token encoding failed: {0}")]
    TokenEncoding(String),
}

impl AuthError {
    /// 일시적인 장애인지 여부
    ///
    /// `true`이면 클라이언트의 토큰을 폐기하지 말고 재시도해야 합니다.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::StoreUnavailable(_))
    }
}
