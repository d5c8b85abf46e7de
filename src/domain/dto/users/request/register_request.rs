//! 회원가입 요청 DTO
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 이메일/패스워드 회원가입 요청
///
/// 검증 실패는 400 에러가 아니라 `RegisterResponse.errors`의 필드 에러로 돌려줍니다.
/// 관리자 권한은 이 요청으로 부여할 수 없습니다. 본문의 `isAdmin`은 무시됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// 사용자명 (3-25자, 영문/숫자만 허용)
    #[validate(length(min = 3, max = 25, message = "사용자명은 3-25자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 5, max = 100, message = "비밀번호는 5-100자 사이여야 합니다"))]
    pub password: String,
}

/// 사용자명 형식 검증 (영문, 숫자만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 영문과 숫자만 사용할 수 있습니다".into()));
    }
    Ok(())
}
