use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::User;

/// 사용자 응답 DTO
///
/// 비밀번호 해시와 refresh secret은 절대 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    pub auth_provider: AuthProvider,
    pub facebook_linked: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let auth_provider = user.auth_provider();
        let User {
            id,
            username,
            email,
            fb_id,
            is_admin,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            username,
            email,
            is_admin,
            auth_provider,
            facebook_linked: fb_id.is_some(),
            created_at: created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}
