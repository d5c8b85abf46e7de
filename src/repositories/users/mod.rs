//! 사용자 데이터 액세스 계층
//!
//! - [`user_store`] - `UserStore` / `UserRepository` trait
//! - [`user_repo`] - MongoDB 구현
//! - [`memory_user_repo`] - 인메모리 구현
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{MongoUserRepository, UserStore};
//!
//! let repo = Arc::new(MongoUserRepository::new(&database));
//! let user = repo.find_user_by_id(1).await?;
//! ```

pub mod memory_user_repo;
pub mod user_repo;
pub mod user_store;

pub use memory_user_repo::InMemoryUserRepository;
pub use user_repo::MongoUserRepository;
pub use user_store::{UserRepository, UserStore};
