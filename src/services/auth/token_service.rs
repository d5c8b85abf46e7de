//! JWT 토큰 수명주기 관리
//!
//! 액세스/리프레시 토큰 쌍의 발급, 검증, 갱신을 담당합니다.
//! 서버 측 세션 저장소 없이 동작하며, 폐기 수단은 사용자별 refresh secret 교체 하나뿐입니다.
//!
//! ## 서명 키
//!
//! | 토큰 | 서명 키 | 기본 수명 |
//! |------|---------|-----------|
//! | 액세스 | 공유 비밀값 | 1시간 |
//! | 리프레시 | 공유 비밀값 + 사용자 refresh secret | 7일 |
//!
//! ## 요청별 상태 전이
//!
//! ```text
//! 토큰 없음                       → MissingToken (익명)
//! 액세스 유효                     → Principal { refreshed: None }      (저장소 접근 없음)
//! 액세스 실패 + 리프레시 없음      → ExpiredOrMalformedAccessToken (익명)
//! 액세스 실패 + 리프레시 유효      → Principal { refreshed: Some(pair) }
//! 액세스 실패 + 리프레시 무효      → UnknownUser / InvalidRefreshToken / StoreUnavailable
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::users::User;
use crate::domain::models::auth::Principal;
use crate::domain::models::token::{TokenClaims, TokenLifetimes, TokenPair, UserPayload};
use crate::errors::{AppError, AuthError};
use crate::repositories::users::UserStore;

/// 갱신 결과: 새 토큰 쌍과 저장소 기준 사용자 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedSession {
    pub tokens: TokenPair,
    pub user: UserPayload,
}

/// 서명 검증 없이 읽어낸 사용자 ID
///
/// 인증된 주체가 아닙니다. 저장소에서 refresh secret을 찾는 용도로만 쓰입니다.
#[derive(Debug)]
pub struct UnverifiedUser {
    claimed_id: i64,
}

impl UnverifiedUser {
    /// 토큰이 주장하는 사용자 ID
    pub fn claimed_id(&self) -> i64 {
        self.claimed_id
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

fn refresh_signing_key(shared_secret: &str, user_refresh_secret: &str) -> String {
    format!("{}{}", shared_secret, user_refresh_secret)
}

fn sign(user: &UserPayload, key: &str, lifetime: Duration) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        user: user.clone(),
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .map_err(|e| AuthError::TokenEncoding(e.to_string()))
}

fn verify(token: &str, key: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    decode::<TokenClaims>(token, &DecodingKey::from_secret(key.as_bytes()), &validation())
        .map(|data| data.claims)
}

/// 토큰 쌍 생성
///
/// 입력과 현재 시각에만 의존하는 순수 함수입니다.
///
/// # Errors
///
/// * `AuthError::InvalidSecret` - 공유 비밀값 또는 refresh secret이 비어 있음
/// * `AuthError::TokenEncoding` - JWT 인코딩 실패
///
/// # Examples
///
/// ```rust,ignore
/// let pair = create_tokens(&UserPayload::with_id(1), "S", "R1", &TokenLifetimes::default())?;
/// assert_eq!(verify_refresh_token(&pair.refresh_token, "S", "R1")?.id, 1);
/// ```
pub fn create_tokens(
    user: &UserPayload,
    shared_secret: &str,
    user_refresh_secret: &str,
    lifetimes: &TokenLifetimes,
) -> Result<TokenPair, AuthError> {
    if shared_secret.is_empty() {
        return Err(AuthError::InvalidSecret("shared secret"));
    }
    if user_refresh_secret.is_empty() {
        return Err(AuthError::InvalidSecret("refresh secret"));
    }

    let token = sign(user, shared_secret, lifetimes.access)?;
    let refresh_token = sign(
        user,
        &refresh_signing_key(shared_secret, user_refresh_secret),
        lifetimes.refresh,
    )?;

    Ok(TokenPair {
        token,
        refresh_token,
    })
}

/// 액세스 토큰 검증
///
/// # Errors
///
/// * `AuthError::ExpiredOrMalformedAccessToken` - 만료, 서명 불일치, 형식 오류
pub fn verify_access_token(token: &str, shared_secret: &str) -> Result<UserPayload, AuthError> {
    if shared_secret.is_empty() {
        return Err(AuthError::InvalidSecret("shared secret"));
    }

    verify(token, shared_secret)
        .map(|claims| claims.user)
        .map_err(|e| AuthError::ExpiredOrMalformedAccessToken(e.to_string()))
}

/// 리프레시 토큰 검증
///
/// 키는 `shared_secret + user_refresh_secret` 입니다. refresh secret이 비어 있으면
/// 액세스 토큰과 키가 같아지므로 무조건 거부합니다.
///
/// # Errors
///
/// * `AuthError::InvalidRefreshToken` - 만료, 서명 불일치, 형식 오류
pub fn verify_refresh_token(
    token: &str,
    shared_secret: &str,
    user_refresh_secret: &str,
) -> Result<UserPayload, AuthError> {
    if shared_secret.is_empty() {
        return Err(AuthError::InvalidSecret("shared secret"));
    }
    if user_refresh_secret.is_empty() {
        return Err(AuthError::InvalidRefreshToken);
    }

    verify(token, &refresh_signing_key(shared_secret, user_refresh_secret))
        .map(|claims| claims.user)
        .map_err(|_| AuthError::InvalidRefreshToken)
}

/// 서명/만료 검증 없이 토큰이 주장하는 사용자 ID를 읽습니다.
///
/// 만료된 액세스 토큰에서 refresh secret 조회 대상을 찾는 복구 경로 전용입니다.
/// 반환값은 [`UnverifiedUser`]이며 인증 결과로 사용할 수 없습니다.
///
/// # Errors
///
/// * `AuthError::ExpiredOrMalformedAccessToken` - JWT로 파싱할 수 없음
pub fn decode_unsafe_for_recovery_only(token: &str) -> Result<UnverifiedUser, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| UnverifiedUser {
            claimed_id: data.claims.user.id,
        })
        .map_err(|e| AuthError::ExpiredOrMalformedAccessToken(e.to_string()))
}

/// 만료된 액세스 토큰과 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
///
/// 1. 액세스 토큰에서 사용자 ID를 검증 없이 읽음
/// 2. 저장소에서 사용자 조회
/// 3. 저장된 refresh secret으로 리프레시 토큰 검증 (같은 사용자여야 함)
/// 4. 같은 refresh secret으로 새 토큰 쌍 발급
///
/// 저장소에는 쓰지 않습니다.
///
/// # Errors
///
/// * `AuthError::ExpiredOrMalformedAccessToken` - 액세스 토큰 파싱 불가
/// * `AuthError::StoreUnavailable` - 저장소 조회 실패 (일시적)
/// * `AuthError::UnknownUser` - 해당 ID의 사용자 없음
/// * `AuthError::InvalidRefreshToken` - 리프레시 토큰 검증 실패
pub async fn refresh_tokens(
    access_token: &str,
    refresh_token: &str,
    store: &dyn UserStore,
    shared_secret: &str,
    lifetimes: &TokenLifetimes,
) -> Result<RefreshedSession, AuthError> {
    let claimed_id = decode_unsafe_for_recovery_only(access_token)?.claimed_id();

    let user = store
        .find_user_by_id(claimed_id)
        .await
        .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?
        .ok_or(AuthError::UnknownUser(claimed_id))?;

    let refresh_owner = verify_refresh_token(refresh_token, shared_secret, &user.refresh_secret)?;
    if refresh_owner.id != user.id {
        return Err(AuthError::InvalidRefreshToken);
    }

    let payload = user.payload();
    let tokens = create_tokens(&payload, shared_secret, &user.refresh_secret, lifetimes)?;

    Ok(RefreshedSession {
        tokens,
        user: payload,
    })
}

/// 요청 헤더 값으로 주체를 결정합니다.
///
/// 빈 문자열 헤더는 없는 것으로 취급합니다.
pub async fn resolve_principal(
    access_token: Option<&str>,
    refresh_token: Option<&str>,
    store: &dyn UserStore,
    shared_secret: &str,
    lifetimes: &TokenLifetimes,
) -> Result<Principal, AuthError> {
    let access_token = access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let access_error = match verify_access_token(access_token, shared_secret) {
        Ok(user) => {
            return Ok(Principal {
                user,
                refreshed: None,
            });
        }
        Err(e) => e,
    };

    let Some(refresh_token) = refresh_token.filter(|t| !t.is_empty()) else {
        return Err(access_error);
    };

    let session = refresh_tokens(access_token, refresh_token, store, shared_secret, lifetimes).await?;

    Ok(Principal {
        user: session.user,
        refreshed: Some(session.tokens),
    })
}

/// 공유 비밀값 (로그/Debug 출력 시 가려짐)
#[derive(Clone)]
struct SharedSecret(Arc<str>);

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}

/// JWT 토큰 관리 서비스
///
/// 기동 시 한 번 만든 공유 비밀값과 수명을 들고 위 함수들에 위임합니다.
/// `web::Data<TokenService>`로 핸들러와 미들웨어에 주입됩니다.
///
/// # Examples
///
/// ```rust,ignore
/// let token_service = TokenService::from_config()?;
/// let pair = token_service.issue(&user)?;
/// ```
#[derive(Debug, Clone)]
pub struct TokenService {
    shared_secret: SharedSecret,
    lifetimes: TokenLifetimes,
}

impl TokenService {
    /// # Errors
    ///
    /// * `AuthError::InvalidSecret` - 공유 비밀값이 비어 있음
    pub fn new(shared_secret: impl Into<String>, lifetimes: TokenLifetimes) -> Result<Self, AuthError> {
        let shared_secret: String = shared_secret.into();
        if shared_secret.is_empty() {
            return Err(AuthError::InvalidSecret("shared secret"));
        }

        Ok(Self {
            shared_secret: SharedSecret(Arc::from(shared_secret)),
            lifetimes,
        })
    }

    /// [`JwtConfig`] 기반 생성
    pub fn from_config() -> Result<Self, AppError> {
        let secret = JwtConfig::shared_secret()?;
        Ok(Self::new(secret, TokenLifetimes::from_config())?)
    }

    pub fn lifetimes(&self) -> &TokenLifetimes {
        &self.lifetimes
    }

    /// 저장된 사용자에게 토큰 쌍 발급 (로그인, 가입, OAuth 콜백)
    pub fn issue(&self, user: &User) -> Result<TokenPair, AuthError> {
        create_tokens(
            &user.payload(),
            &self.shared_secret.0,
            &user.refresh_secret,
            &self.lifetimes,
        )
    }

    pub fn verify_access(&self, token: &str) -> Result<UserPayload, AuthError> {
        verify_access_token(token, &self.shared_secret.0)
    }

    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
        store: &dyn UserStore,
    ) -> Result<RefreshedSession, AuthError> {
        refresh_tokens(
            access_token,
            refresh_token,
            store,
            &self.shared_secret.0,
            &self.lifetimes,
        )
        .await
    }

    pub async fn resolve(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        store: &dyn UserStore,
    ) -> Result<Principal, AuthError> {
        resolve_principal(
            access_token,
            refresh_token,
            store,
            &self.shared_secret.0,
            &self.lifetimes,
        )
        .await
    }
}
