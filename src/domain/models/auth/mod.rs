//! 요청 인증 모델

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::{AuthenticatedUser, OptionalUser};
pub use authentication_request::{AuthMode, Principal};
