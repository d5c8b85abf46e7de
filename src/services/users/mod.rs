//! 사용자 계정 서비스 모듈
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 로그인 실패 사유를 구분하지 않는 단일 에러 메시지
//! - 비밀번호 변경 시 refresh secret 동시 교체

pub mod user_service;

pub use user_service::UserService;
