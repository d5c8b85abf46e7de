//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 토큰 게이트웨이 (AuthMiddleware)
//! - `x-token` / `x-refresh-token` 헤더 검증
//! - 만료된 액세스 토큰의 조용한 재발급
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(token_service.clone())
//!     .app_data(user_store.clone())
//!     .service(
//!         web::scope("/api/v1/account")
//!             .wrap(AuthMiddleware::required())
//!             .service(forget_password)
//!     )
//! ```

mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::AuthMiddleware;

/// 액세스 토큰 요청/응답 헤더
pub const ACCESS_TOKEN_HEADER: &str = "x-token";
/// 리프레시 토큰 요청/응답 헤더
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
