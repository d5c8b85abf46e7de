//! 제안 게시판 API 백엔드
//!
//! 상태 없는 JWT 액세스/리프레시 토큰 수명주기와 이를 검사하는 요청 게이트웨이,
//! 로컬 가입/로그인, Facebook OAuth 로그인을 제공합니다.
//!
//! # Features
//!
//! - **토큰 쌍**: 액세스 토큰(공유 비밀값 서명)과 리프레시 토큰(공유 비밀값 + 사용자별 refresh secret 서명)
//! - **조용한 갱신**: 만료된 액세스 토큰 + 유효한 리프레시 토큰이면 같은 요청 안에서 재발급
//! - **세션 폐기**: refresh secret 교체 (비밀번호 재설정, 전체 로그아웃)
//! - **Facebook OAuth**: 최초 로그인 생성, 기존 이메일 계정 연결
//! - **MongoDB**: 사용자 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← x-token / x-refresh-token 게이트웨이
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰 관리, 계정, OAuth
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / UserRepository
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use suggestion_board_backend::services::auth::TokenService;
//!
//! let token_service = TokenService::from_config()?;
//! let pair = token_service.issue(&user)?;
//! let principal = token_service
//!     .resolve(Some(&pair.token), Some(&pair.refresh_token), &store)
//!     .await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
