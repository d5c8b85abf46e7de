//! User Entity Implementation
//!
//! 사용자 저장소가 소유하는 사용자 레코드입니다.
//! 로컬 가입(이메일/패스워드)과 Facebook 로그인을 하나의 모델로 표현하며,
//! 리프레시 토큰 폐기에 쓰이는 사용자별 `refresh_secret`을 보관합니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthProvider;
use crate::domain::models::token::UserPayload;

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 저장소가 발급하는 정수 ID
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 이메일 (존재할 경우 unique)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// bcrypt 해시 (Facebook 전용 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Facebook 사용자 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fb_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// 리프레시 토큰 서명 키의 사용자별 구성요소. 교체하면 기존 리프레시 토큰이 모두 무효화됩니다.
    pub refresh_secret: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 토큰에 실리는 최소 사용자 정보
    pub fn payload(&self) -> UserPayload {
        UserPayload {
            id: self.id,
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }

    /// 비밀번호 로그인이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// 계정을 만든 인증 방식
    pub fn auth_provider(&self) -> AuthProvider {
        if self.password_hash.is_none() && self.fb_id.is_some() {
            AuthProvider::Facebook
        } else {
            AuthProvider::Local
        }
    }
}

/// 아직 ID가 할당되지 않은 사용자
///
/// 저장소의 `create`가 ID를 발급해 [`User`]로 변환합니다.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub fb_id: Option<String>,
    pub is_admin: bool,
    pub refresh_secret: String,
}

impl NewUser {
    /// 이메일/패스워드 가입 사용자
    pub fn local(username: String, email: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            username: Some(username),
            email: Some(email),
            password_hash: Some(password_hash),
            fb_id: None,
            is_admin,
            refresh_secret: new_refresh_secret(),
        }
    }

    /// Facebook 최초 로그인 사용자
    pub fn facebook(fb_id: String, email: Option<String>) -> Self {
        Self {
            username: None,
            email,
            password_hash: None,
            fb_id: Some(fb_id),
            is_admin: false,
            refresh_secret: new_refresh_secret(),
        }
    }

    pub fn into_user(self, id: i64) -> User {
        let now = DateTime::now();

        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            fb_id: self.fb_id,
            is_admin: self.is_admin,
            refresh_secret: self.refresh_secret,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 새 refresh secret 생성 (UUID v4)
pub fn new_refresh_secret() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_user_payload() {
        let user = NewUser::local("alice".into(), "alice@example.com".into(), "hash".into(), true)
            .into_user(7);

        let payload = user.payload();
        assert_eq!(payload.id, 7);
        assert_eq!(payload.username.as_deref(), Some("alice"));
        assert!(payload.is_admin);
        assert_eq!(user.auth_provider(), AuthProvider::Local);
        assert!(user.can_authenticate_with_password());
    }

    #[test]
    fn test_facebook_user_has_no_password() {
        let user = NewUser::facebook("fb-1".into(), Some("bob@example.com".into())).into_user(3);

        assert_eq!(user.auth_provider(), AuthProvider::Facebook);
        assert!(!user.can_authenticate_with_password());
        assert!(!user.refresh_secret.is_empty());
    }

    #[test]
    fn test_refresh_secrets_are_unique() {
        assert_ne!(new_refresh_secret(), new_refresh_secret());
    }

    #[test]
    fn test_bson_id_field_name() {
        let user = NewUser::facebook("fb-1".into(), None).into_user(42);
        let doc = mongodb::bson::to_document(&user).unwrap();

        assert_eq!(doc.get_i64("_id").unwrap(), 42);
        assert!(!doc.contains_key("email"));
        assert!(!doc.contains_key("password_hash"));
    }
}
