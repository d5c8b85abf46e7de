//! 인증 요청관련 DTO
//!
//! 로그인, 명시적 토큰 갱신, 비밀번호 재설정, OAuth 콜백 요청을 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 명시적 토큰 갱신 요청
///
/// 만료된 액세스 토큰과 리프레시 토큰을 함께 보냅니다.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokensRequest {
    #[validate(length(min = 1, message = "액세스 토큰이 필요합니다"))]
    pub token: String,

    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// 비밀번호 재설정 요청
///
/// 성공하면 해당 사용자의 refresh secret도 교체되어 기존 세션이 모두 끊깁니다.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForgetPasswordRequest {
    pub user_id: i64,

    #[validate(length(min = 5, max = 100, message = "비밀번호는 5-100자 사이여야 합니다"))]
    pub new_password: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 `code` 없이 `error`만 전달됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "State가 필요합니다"))]
    pub state: String,

    pub error: Option<String>,
    pub error_description: Option<String>,
}
