//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 클라이언트 리다이렉트, 환경 및 보안 관련 설정을 관리합니다.

use std::env;
use std::time::Duration;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());

        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트. 기본값: 8080 (`PORT` 또는 `SERVER_PORT`)
    pub fn port() -> u16 {
        env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 외부에서 접근 가능한 서버 주소 (OAuth 콜백 URL 조립용)
    ///
    /// `SERVER_HOST`는 스킴을 포함합니다. 예: `http://localhost`
    pub fn public_base_url() -> String {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "http://localhost".to_string());
        format!("{}:{}", host.trim_end_matches('/'), Self::port())
    }
}

/// 프론트엔드 클라이언트 설정
///
/// OAuth 로그인 완료 후 토큰을 들고 돌아갈 주소를 결정합니다.
pub struct ClientConfig;

impl ClientConfig {
    /// `CLIENT_HOST` (스킴 포함). 기본값: `http://localhost`
    pub fn host() -> String {
        env::var("CLIENT_HOST").unwrap_or_else(|_| "http://localhost".to_string())
    }

    /// `CLIENT_PORT`. 기본값: 3000
    pub fn port() -> u16 {
        env::var("CLIENT_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000)
    }

    /// 클라이언트 origin (`host:port`)
    pub fn origin() -> String {
        format!("{}:{}", Self::host().trim_end_matches('/'), Self::port())
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// `MONGODB_URI`. 기본값: `mongodb://localhost:27017`
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// `DATABASE_NAME`. 기본값: `suggestion_board_dev`
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "suggestion_board_dev".to_string())
    }

    /// 서버 선택/연결 타임아웃 (`MONGODB_TIMEOUT_SECS`, 기본 5초)
    ///
    /// 저장소 조회가 이 시간 안에 끝나지 않으면 요청은 일시적 장애로 처리됩니다.
    pub fn timeout() -> Duration {
        let secs = env::var("MONGODB_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(5);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
        assert!(Environment::from_str("whatever").is_production());
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() && env::var("SERVER_PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_client_origin_default() {
        if env::var("CLIENT_HOST").is_err() && env::var("CLIENT_PORT").is_err() {
            assert_eq!(ClientConfig::origin(), "http://localhost:3000");
        }
    }
}
