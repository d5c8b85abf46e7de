//! 사용자/인증 응답 DTO

pub mod register_response;
pub mod user_response;

pub use register_response::{FieldError, RegisterResponse};
pub use user_response::UserResponse;
