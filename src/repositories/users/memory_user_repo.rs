//! 인메모리 사용자 리포지토리
//!
//! MongoDB와 같은 의미(정수 ID 발급, 이메일/Facebook ID 유니크, 원자적 교체)를
//! 프로세스 메모리에서 제공합니다. 테스트와 로컬 실험에 사용합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::DateTime;

use super::user_store::{UserRepository, UserStore};
use crate::domain::entities::users::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    last_id: AtomicI64,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소 장애를 흉내냅니다. `true`인 동안 모든 연산이 `DatabaseError`를 반환합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 이미 ID가 정해진 사용자를 그대로 넣습니다.
    pub fn insert(&self, user: User) -> AppResult<()> {
        self.last_id.fetch_max(user.id, Ordering::SeqCst);
        self.write()?.insert(user.id, user);
        Ok(())
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("user store unavailable".to_string()));
        }
        Ok(())
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, HashMap<i64, User>>> {
        self.ensure_available()?;
        self.users
            .read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, HashMap<i64, User>>> {
        self.ensure_available()?;
        self.users
            .write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn update<F>(&self, id: i64, apply: F) -> AppResult<Option<User>>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.write()?;
        Ok(users.get_mut(&id).map(|user| {
            apply(user);
            user.updated_at = DateTime::now();
            user.clone()
        }))
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.read()?.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .read()?
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_fb_id_or_email(
        &self,
        fb_id: &str,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let users = self.read()?;
        let by_fb_id = users.values().find(|u| u.fb_id.as_deref() == Some(fb_id));
        let by_email = || {
            email.and_then(|email| users.values().find(|u| u.email.as_deref() == Some(email)))
        };
        Ok(by_fb_id.or_else(by_email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.write()?;

        let taken = users.values().any(|u| {
            (new_user.email.is_some() && u.email == new_user.email)
                || (new_user.fb_id.is_some() && u.fb_id == new_user.fb_id)
        });
        if taken {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일 또는 Facebook 계정입니다".to_string(),
            ));
        }

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = new_user.into_user(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn link_facebook(&self, id: i64, fb_id: &str) -> AppResult<Option<User>> {
        self.update(id, |user| user.fb_id = Some(fb_id.to_string()))
    }

    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
        refresh_secret: &str,
    ) -> AppResult<bool> {
        let updated = self.update(id, |user| {
            user.password_hash = Some(password_hash.to_string());
            user.refresh_secret = refresh_secret.to_string();
        })?;
        Ok(updated.is_some())
    }

    async fn rotate_refresh_secret(&self, id: i64, refresh_secret: &str) -> AppResult<bool> {
        let updated = self.update(id, |user| user.refresh_secret = refresh_secret.to_string())?;
        Ok(updated.is_some())
    }
}
