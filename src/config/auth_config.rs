//! # Authentication Configuration Module
//!
//! JWT 서명 비밀값, 토큰 수명, Facebook OAuth 클라이언트, OAuth state 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export SERVER_SECRET="your-super-secret-jwt-key"   # JWT_SECRET 도 허용
//! export JWT_EXPIRATION_MINUTES="60"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```
//!
//! ### Facebook 로그인 설정
//! ```bash
//! export FACEBOOK_CLIENT_LOGIN_APP_ID="your-app-id"
//! export FACEBOOK_CLIENT_LOGIN_APP_SECRET="your-app-secret"
//! # 생략 시 {SERVER_HOST}:{PORT}/auth/facebook/callback
//! export FACEBOOK_REDIRECT_URI="https://api.example.com/auth/facebook/callback"
//! ```
//!
//! ### OAuth 보안 설정
//! ```bash
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! export OAUTH_SESSION_TIMEOUT_MINUTES="10"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtConfig, FacebookOAuthConfig};
//!
//! // 서버 기동 시 한 번만 읽어 TokenService에 주입
//! let secret = JwtConfig::shared_secret()?;
//! let minutes = JwtConfig::access_expiration_minutes();
//!
//! let client_id = FacebookOAuthConfig::client_id()?;
//! ```

use std::env;

use super::data_config::{Environment, ServerConfig};
use crate::errors::AppError;

const DEV_SHARED_SECRET: &str = "dev-only-shared-secret";
const DEV_STATE_SECRET: &str = "dev-only-oauth-state-secret";

/// 필수 환경 변수를 읽습니다. 비어 있거나 없으면 `InternalError`.
fn required_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InternalError(format!("{} must be set", name))),
    }
}

/// JSON Web Token (JWT) 관련 설정
///
/// 액세스 토큰은 공유 비밀값으로, 리프레시 토큰은 공유 비밀값과 사용자별
/// refresh secret을 이어 붙인 키로 서명됩니다. 공유 비밀값은 기동 시 한 번 읽혀
/// 불변 값으로 전달됩니다.
pub struct JwtConfig;

impl JwtConfig {
    /// 프로세스 전역 공유 비밀값을 반환합니다.
    ///
    /// `SERVER_SECRET`, 없으면 `JWT_SECRET`을 읽습니다.
    ///
    /// # Errors
    ///
    /// 프로덕션에서 값이 없거나 비어 있으면 `AppError::InternalError`.
    /// 그 외 환경에서는 경고 로그와 함께 개발용 기본값을 사용합니다.
    pub fn shared_secret() -> Result<String, AppError> {
        let raw = env::var("SERVER_SECRET").or_else(|_| env::var("JWT_SECRET")).ok();
        Self::resolve_shared_secret(raw, &Environment::current())
    }

    /// 환경별 공유 비밀값 결정 규칙
    pub fn resolve_shared_secret(
        raw: Option<String>,
        environment: &Environment,
    ) -> Result<String, AppError> {
        match raw {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ if environment.is_production() => Err(AppError::InternalError(
                "SERVER_SECRET must be set in production".to_string(),
            )),
            _ => {
                log::warn!("SERVER_SECRET not set, using default (not secure for production!)");
                Ok(DEV_SHARED_SECRET.to_string())
            }
        }
    }

    /// 액세스 토큰 수명 (분). 기본값 60분
    pub fn access_expiration_minutes() -> i64 {
        env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .unwrap_or(60)
    }

    /// 리프레시 토큰 수명 (일). 기본값 7일
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(7)
    }
}

/// Facebook OAuth 2.0 클라이언트 설정
///
/// client_secret은 서버 사이드 코드 교환에만 사용되며 로그에 남기지 않습니다.
pub struct FacebookOAuthConfig;

impl FacebookOAuthConfig {
    /// Facebook 앱 ID (`FACEBOOK_CLIENT_LOGIN_APP_ID`)
    pub fn client_id() -> Result<String, AppError> {
        required_var("FACEBOOK_CLIENT_LOGIN_APP_ID")
    }

    /// Facebook 앱 시크릿 (`FACEBOOK_CLIENT_LOGIN_APP_SECRET`)
    pub fn client_secret() -> Result<String, AppError> {
        required_var("FACEBOOK_CLIENT_LOGIN_APP_SECRET")
    }

    /// OAuth 콜백 URI
    ///
    /// `FACEBOOK_REDIRECT_URI`가 없으면 서버 공개 주소 뒤에 `/auth/facebook/callback`을 붙입니다.
    pub fn redirect_uri() -> String {
        env::var("FACEBOOK_REDIRECT_URI").unwrap_or_else(|_| {
            format!("{}/auth/facebook/callback", ServerConfig::public_base_url())
        })
    }

    /// 로그인 다이얼로그 엔드포인트
    pub fn auth_uri() -> String {
        env::var("FACEBOOK_AUTH_URI")
            .unwrap_or_else(|_| "https://www.facebook.com/v19.0/dialog/oauth".to_string())
    }

    /// code → access_token 교환 엔드포인트
    pub fn token_uri() -> String {
        env::var("FACEBOOK_TOKEN_URI")
            .unwrap_or_else(|_| "https://graph.facebook.com/v19.0/oauth/access_token".to_string())
    }

    /// 프로필 조회 엔드포인트 (`id,email` 필드만 요청)
    pub fn profile_uri() -> String {
        env::var("FACEBOOK_PROFILE_URI")
            .unwrap_or_else(|_| "https://graph.facebook.com/me".to_string())
    }

    /// 요청 스코프
    pub fn scope() -> &'static str {
        "email"
    }
}

/// OAuth 공통 보안 설정
///
/// state 매개변수 서명과 유효 시간을 관리합니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth State 서명용 비밀값 (`OAUTH_STATE_SECRET`)
    ///
    /// # Errors
    ///
    /// 프로덕션에서 값이 없거나 비어 있으면 `AppError::InternalError`.
    pub fn state_secret() -> Result<String, AppError> {
        Self::resolve_state_secret(env::var("OAUTH_STATE_SECRET").ok(), &Environment::current())
    }

    /// 환경별 state 비밀값 결정 규칙
    pub fn resolve_state_secret(
        raw: Option<String>,
        environment: &Environment,
    ) -> Result<String, AppError> {
        match raw {
            Some(secret) if !secret.trim().is_empty() => Ok(secret),
            _ if environment.is_production() => Err(AppError::InternalError(
                "OAUTH_STATE_SECRET must be set in production".to_string(),
            )),
            _ => {
                log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
                Ok(DEV_STATE_SECRET.to_string())
            }
        }
    }

    /// state 유효 시간 (분). 기본값 10분
    pub fn session_timeout_minutes() -> i64 {
        env::var("OAUTH_SESSION_TIMEOUT_MINUTES")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(10)
    }
}

/// 지원하는 인증 공급자
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/패스워드 인증
    Local,
    /// Facebook OAuth 인증
    Facebook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Facebook).unwrap();
        assert_eq!(json, "\"facebook\"");
        let back: AuthProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AuthProvider::Facebook);
    }

    #[test]
    fn test_shared_secret_is_required_in_production() {
        let missing = JwtConfig::resolve_shared_secret(None, &Environment::Production);
        assert!(matches!(missing, Err(AppError::InternalError(_))));

        let empty = JwtConfig::resolve_shared_secret(Some(String::new()), &Environment::Production);
        assert!(empty.is_err());
    }

    #[test]
    fn test_state_secret_is_required_in_production() {
        let missing = OAuthConfig::resolve_state_secret(None, &Environment::Production);
        assert!(matches!(missing, Err(AppError::InternalError(_))));

        let blank = OAuthConfig::resolve_state_secret(Some("  ".to_string()), &Environment::Production);
        assert!(blank.is_err());

        let given = OAuthConfig::resolve_state_secret(Some("S".to_string()), &Environment::Production);
        assert_eq!(given.unwrap(), "S");

        let dev = OAuthConfig::resolve_state_secret(None, &Environment::Development).unwrap();
        assert!(!dev.is_empty());
    }

    #[test]
    fn test_shared_secret_dev_fallback() {
        let secret = JwtConfig::resolve_shared_secret(None, &Environment::Development).unwrap();
        assert!(!secret.is_empty());

        let given = JwtConfig::resolve_shared_secret(Some("S".to_string()), &Environment::Production);
        assert_eq!(given.unwrap(), "S");
    }
}
