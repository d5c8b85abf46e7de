//! 도메인 모델
//!
//! - [`token`] - JWT 클레임, 토큰 쌍, 수명
//! - [`auth`] - 요청 주체와 인증 모드
//! - [`oauth`] - Facebook OAuth 응답

pub mod auth;
pub mod oauth;
pub mod token;

pub use auth::*;
pub use oauth::*;
pub use token::*;
