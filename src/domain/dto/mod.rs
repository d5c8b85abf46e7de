//! # Data Transfer Objects
//!
//! HTTP 계층과 서비스 계층 사이에서 주고받는 요청/응답 구조체입니다.
//! 엔티티를 직접 노출하지 않고, 비밀번호 해시나 refresh secret 같은
//! 민감 정보는 응답 DTO로 변환하면서 제거합니다.
//!
//! 요청 DTO는 `validator::Validate`를 구현하며 핸들러에서 검증합니다.
//!
//! ```rust,ignore
//! payload.validate()
//!     .map_err(|e| AppError::ValidationError(e.to_string()))?;
//! ```

pub mod users;

pub use users::*;
