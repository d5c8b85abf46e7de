//! # Domain Layer
//!
//! - [`entities`] - 저장소에 영속되는 엔티티 (`User`)
//! - [`dto`] - HTTP 요청/응답 구조체
//! - [`models`] - 토큰, 인증 주체, OAuth 응답 모델

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::users::{NewUser, User};
pub use dto::users::request::*;
pub use dto::users::response::*;
pub use models::*;
