//! 에러 타입 모듈
//!
//! - [`errors`] - HTTP 응답으로 변환되는 `AppError`
//! - [`auth_errors`] - 토큰 수명주기 실패 분류 `AuthError`

#[allow(clippy::module_inception)]
pub mod errors;
pub mod auth_errors;

pub use errors::{AppError, AppResult, ErrorContext};
pub use auth_errors::AuthError;
