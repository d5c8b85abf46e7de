//! 사용자 저장소 계약
//!
//! 토큰 관리자는 [`UserStore::find_user_by_id`] 하나만 사용합니다.
//! 계정 서비스는 그 위에 쓰기 연산을 더한 [`UserRepository`]를 사용합니다.
//!
//! 동시성 제어는 저장소의 책임입니다. refresh secret 교체와 비밀번호 변경은
//! 문서 하나에 대한 단일 원자적 업데이트로 수행되어야 합니다.

use async_trait::async_trait;

use crate::domain::entities::users::{NewUser, User};
use crate::errors::AppResult;

/// 토큰 갱신 경로에서 사용하는 읽기 전용 저장소 인터페이스
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID로 사용자 조회
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - 사용자 존재
    /// * `Ok(None)` - 해당 ID의 사용자 없음
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 조회 실패 또는 타임아웃
    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>>;
}

/// 계정 관리용 저장소 인터페이스
#[async_trait]
pub trait UserRepository: UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Facebook ID 또는 이메일이 일치하는 사용자 조회
    ///
    /// 둘 다 있으면 Facebook ID가 일치하는 사용자를 돌려줍니다.
    async fn find_by_fb_id_or_email(
        &self,
        fb_id: &str,
        email: Option<&str>,
    ) -> AppResult<Option<User>>;

    /// 새 ID를 발급해 사용자를 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 Facebook ID 중복
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// 기존 계정에 Facebook ID 연결
    async fn link_facebook(&self, id: i64, fb_id: &str) -> AppResult<Option<User>>;

    /// 비밀번호 해시와 refresh secret을 한 번의 업데이트로 교체합니다.
    ///
    /// 반환값은 대상 사용자가 존재했는지 여부입니다.
    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
        refresh_secret: &str,
    ) -> AppResult<bool>;

    /// refresh secret만 교체해 해당 사용자의 모든 리프레시 토큰을 무효화합니다.
    async fn rotate_refresh_secret(&self, id: i64, refresh_secret: &str) -> AppResult<bool>;
}
