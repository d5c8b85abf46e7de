//! # Facebook OAuth 2.0 로그인 서비스
//!
//! Authorization Code 플로우로 Facebook 계정을 확인하고,
//! 사용자 저장소의 계정을 생성하거나 기존 계정에 연결합니다.
//!
//! ## 플로우
//!
//! ```text
//! GET /flogin
//!   → 302 https://www.facebook.com/v19.0/dialog/oauth?client_id=..&redirect_uri=..&scope=email&response_type=code&state=..
//! GET /auth/facebook/callback?code=..&state=..
//!   → state 검증
//!   → code → access_token 교환 (Graph API)
//!   → /me?fields=id,email 조회
//!   → 계정 생성/연결
//!   → 302 {CLIENT_HOST}:{CLIENT_PORT}/home?token=..&refreshToken=..
//! ```
//!
//! ## 계정 연결 정책
//!
//! | 조회 결과 (fb_id 또는 email 일치) | 처리 |
//! |-----------------------------------|------|
//! | 없음 | 새 Facebook 계정 생성 |
//! | 있음, fb_id 없음 | 기존 계정에 fb_id 연결 |
//! | 있음, fb_id 있음 | 그대로 로그인 |
//!
//! ## State 매개변수
//!
//! 서버 측 저장소 없이 검증할 수 있도록 `{발급시각}.{서명}` 형식을 사용합니다.
//! 서명은 `SHA-256("{발급시각}:{OAUTH_STATE_SECRET}")`의 base64url 인코딩입니다.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::config::{FacebookOAuthConfig, OAuthConfig};
use crate::domain::entities::users::{NewUser, User};
use crate::domain::models::oauth::{FacebookProfile, FacebookTokenResponse, OAuthLoginUrlResponse};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

fn state_signature(issued_at: i64, secret: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", issued_at, secret).as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// 발급 시각을 담은 서명된 state 생성
pub fn sign_state(issued_at: i64, secret: &str) -> String {
    format!("{}.{}", issued_at, state_signature(issued_at, secret))
}

/// state 서명과 유효 시간 검증
///
/// # Errors
///
/// * `AppError::AuthenticationError` - 형식 오류, 서명 불일치, 만료
pub fn verify_state(state: &str, secret: &str, now: i64, max_age_secs: i64) -> AppResult<()> {
    let invalid = || AppError::AuthenticationError("유효하지 않은 OAuth state".to_string());

    let (issued_at, signature) = state.split_once('.').ok_or_else(invalid)?;
    let issued_at: i64 = issued_at.parse().map_err(|_| invalid())?;

    if state_signature(issued_at, secret) != signature {
        return Err(invalid());
    }

    if issued_at > now || now - issued_at > max_age_secs {
        return Err(AppError::AuthenticationError("만료된 OAuth state".to_string()));
    }

    Ok(())
}

/// Facebook 로그인 서비스
///
/// # Examples
///
/// ```rust,ignore
/// let facebook = FacebookAuthService::new(user_repo.clone(), OAuthConfig::state_secret()?);
/// let redirect = facebook.get_login_url()?;
/// let user = facebook.authenticate_with_code(&code, &state).await?;
/// ```
#[derive(Clone)]
pub struct FacebookAuthService {
    user_repo: Arc<dyn UserRepository>,
    http: reqwest::Client,
    state_secret: Arc<str>,
}

impl FacebookAuthService {
    /// `state_secret`은 기동 시 [`OAuthConfig::state_secret`]으로 한 번 읽은 값입니다.
    pub fn new(user_repo: Arc<dyn UserRepository>, state_secret: impl Into<Arc<str>>) -> Self {
        Self {
            user_repo,
            http: reqwest::Client::new(),
            state_secret: state_secret.into(),
        }
    }

    /// Facebook 로그인 다이얼로그 URL 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - Facebook 앱 ID 미설정
    pub fn get_login_url(&self) -> AppResult<OAuthLoginUrlResponse> {
        let state = sign_state(Utc::now().timestamp(), &self.state_secret);

        let params = [
            ("client_id", FacebookOAuthConfig::client_id()?),
            ("redirect_uri", FacebookOAuthConfig::redirect_uri()),
            ("scope", FacebookOAuthConfig::scope().to_string()),
            ("response_type", "code".to_string()),
            ("state", state.clone()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let login_url = format!("{}?{}", FacebookOAuthConfig::auth_uri(), query_string);

        Ok(OAuthLoginUrlResponse { login_url, state })
    }

    /// Authorization Code로 Facebook 사용자를 확인하고 계정을 준비합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - state 검증 실패
    /// * `AppError::ExternalServiceError` - Graph API 통신/응답 오류
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> AppResult<User> {
        verify_state(
            state,
            &self.state_secret,
            Utc::now().timestamp(),
            OAuthConfig::session_timeout_minutes() * 60,
        )?;

        let token_response = self.exchange_code_for_token(auth_code).await?;
        let profile = self.get_profile(&token_response.access_token).await?;

        self.link_or_create(profile).await
    }

    async fn exchange_code_for_token(&self, auth_code: &str) -> AppResult<FacebookTokenResponse> {
        let params = [
            ("client_id", FacebookOAuthConfig::client_id()?),
            ("redirect_uri", FacebookOAuthConfig::redirect_uri()),
            ("client_secret", FacebookOAuthConfig::client_secret()?),
            ("code", auth_code.to_string()),
        ];

        let response = self
            .http
            .get(FacebookOAuthConfig::token_uri())
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Facebook 토큰 교환 실패: {}",
                error_text
            )));
        }

        response
            .json::<FacebookTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_profile(&self, access_token: &str) -> AppResult<FacebookProfile> {
        let response = self
            .http
            .get(FacebookOAuthConfig::profile_uri())
            .query(&[("fields", "id,email"), ("access_token", access_token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 프로필 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Facebook 프로필 조회 실패: {}",
                error_text
            )));
        }

        response
            .json::<FacebookProfile>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 프로필 파싱 실패: {}", e)))
    }

    /// Facebook 프로필을 저장소 계정에 대응시킵니다.
    pub async fn link_or_create(&self, profile: FacebookProfile) -> AppResult<User> {
        let existing = self
            .user_repo
            .find_by_fb_id_or_email(&profile.id, profile.email.as_deref())
            .await?;

        match existing {
            None => {
                log::info!("새 Facebook 사용자 등록: {}", profile.id);
                self.user_repo
                    .create(NewUser::facebook(profile.id, profile.email))
                    .await
            }
            Some(user) if user.fb_id.is_none() => {
                log::info!("기존 계정에 Facebook 연결: 사용자 {}", user.id);
                self.user_repo
                    .link_facebook(user.id, &profile.id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
            }
            Some(user) => {
                log::debug!("Facebook 사용자 로그인: 사용자 {}", user.id);
                Ok(user)
            }
        }
    }
}
