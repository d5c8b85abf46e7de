//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App)
//! └─────────────────────┬───────────────────────┘
//!                       │ x-token / x-refresh-token
//! ┌─────────────────────▼───────────────────────┐
//!   AuthMiddleware - 토큰 게이트웨이
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 핸들러 규칙
//!
//! - 서비스는 `web::Data<...>`로 주입받습니다.
//! - 인증된 사용자는 `AuthenticatedUser` / `OptionalUser` 추출자로 받습니다.
//! - 반환 타입은 `Result<HttpResponse, AppError>`이며, 에러는 `AppError`의
//!   `ResponseError` 구현이 JSON 응답으로 바꿉니다.
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login(
//!     user_service: web::Data<UserService>,
//!     payload: web::Json<LoginRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     let tokens = user_service.login(payload.into_inner()).await?;
//!     Ok(HttpResponse::Ok().json(tokens))
//! }
//! ```

pub mod auth;
pub mod users;
