//! JWT 클레임과 토큰 쌍
//!
//! 액세스/리프레시 토큰은 같은 클레임 구조 `{ user, iat, exp }`를 사용하며
//! 서명 키와 만료 시간만 다릅니다.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;

/// 토큰에 실리는 사용자 정보
///
/// `id`만 필수입니다. 나머지는 클라이언트 표시용이며 권한 판단은 `is_admin`만 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, rename = "isAdmin")]
    pub is_admin: bool,
}

impl UserPayload {
    /// ID만 가진 페이로드
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            username: None,
            is_admin: false,
        }
    }
}

/// JWT 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user: UserPayload,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

/// 액세스/리프레시 토큰 쌍
///
/// 항상 두 토큰이 함께 발급됩니다. 직렬화 형태는 `{ "token", "refreshToken" }` 입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// 토큰 수명 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    pub fn new(access: Duration, refresh: Duration) -> Self {
        Self { access, refresh }
    }

    /// 환경 변수 기반 수명 (`JWT_EXPIRATION_MINUTES`, `JWT_REFRESH_EXPIRATION_DAYS`)
    pub fn from_config() -> Self {
        Self {
            access: Duration::minutes(JwtConfig::access_expiration_minutes()),
            refresh: Duration::days(JwtConfig::refresh_expiration_days()),
        }
    }
}

impl Default for TokenLifetimes {
    /// 액세스 1시간, 리프레시 7일
    fn default() -> Self {
        Self {
            access: Duration::hours(1),
            refresh: Duration::days(7),
        }
    }
}
