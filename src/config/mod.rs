//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 클라이언트, 환경 관련 설정
//! - [`auth_config`] - JWT, Facebook OAuth, OAuth state 관련 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 프로덕션에서 필수 값이 없으면 기동 단계에서 에러를 반환
//!
//! 설정값은 `main`에서 한 번 읽혀 서비스 생성자에 전달됩니다.
//! 요청 처리 중에 전역 상태를 다시 읽지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let secret = JwtConfig::shared_secret()?;
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_SECRET="your-super-secret-key"
//! export CLIENT_HOST="http://localhost"
//! export CLIENT_PORT="3000"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
