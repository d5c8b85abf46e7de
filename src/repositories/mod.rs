//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리포지토리는 trait 객체(`Arc<dyn UserRepository>`)로 서비스에 주입됩니다.
//! 운영에서는 MongoDB 구현을, 테스트에서는 인메모리 구현을 사용합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{InMemoryUserRepository, UserRepository};
//!
//! let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
//! let user = repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
