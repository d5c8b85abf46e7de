//! 인증 서비스 모듈
//!
//! # Features
//!
//! - 토큰 쌍 생성, 검증, 만료 토큰 복구 갱신
//! - 요청 헤더 기반 주체 결정 (게이트웨이 상태 전이)
//! - Facebook OAuth 로그인과 계정 연결
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - 리프레시 토큰 키에 사용자별 refresh secret 포함 (교체 시 일괄 폐기)
//! - CSRF 방지용 서명된 OAuth state

pub mod facebook_auth_service;
pub mod token_service;

pub use facebook_auth_service::FacebookAuthService;
pub use token_service::*;
