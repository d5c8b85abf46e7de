//! # Facebook OAuth 응답 모델
//!
//! Graph API의 토큰 교환 응답과 `/me?fields=id,email` 프로필 응답을 역직렬화합니다.
//!
//! ```text
//! GET https://graph.facebook.com/v19.0/oauth/access_token?client_id=..&redirect_uri=..&client_secret=..&code=..
//! → { "access_token": "EAAB...", "token_type": "bearer", "expires_in": 5183944 }
//!
//! GET https://graph.facebook.com/me?fields=id,email&access_token=EAAB...
//! → { "id": "10210...", "email": "user@example.com" }
//! ```

use serde::{Deserialize, Serialize};

/// code → access_token 교환 응답
#[derive(Debug, Clone, Deserialize)]
pub struct FacebookTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Facebook 프로필
///
/// 사용자가 이메일 권한을 거부하면 `email`이 없을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 로그인 URL 응답
#[derive(Debug, Clone, Serialize)]
pub struct OAuthLoginUrlResponse {
    pub login_url: String,
    pub state: String,
}
