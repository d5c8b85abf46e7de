//! 사용자/인증 요청 DTO

pub mod auth_request;
pub mod register_request;

pub use auth_request::{ForgetPasswordRequest, LoginRequest, OAuthCallbackQuery, RefreshTokensRequest};
pub use register_request::RegisterRequest;
