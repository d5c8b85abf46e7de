//! Authentication HTTP Handlers
//!
//! 로컬 가입/로그인, 명시적 토큰 갱신, Facebook OAuth 엔드포인트입니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: `POST /api/v1/auth/register`, `POST /api/v1/auth/login`
//! - **토큰 갱신**: `POST /api/v1/auth/refresh`
//! - **Facebook OAuth**: `GET /flogin`, `GET /auth/facebook/callback`
use actix_web::{get, http::header, post, web, HttpResponse};
use validator::Validate;

use crate::config::ClientConfig;
use crate::domain::dto::users::request::{
    LoginRequest, OAuthCallbackQuery, RefreshTokensRequest, RegisterRequest,
};
use crate::errors::AppError;
use crate::repositories::users::UserStore;
use crate::services::auth::{FacebookAuthService, TokenService};
use crate::services::users::UserService;

/// 회원가입 핸들러
///
/// 검증 실패와 이메일 중복도 200 응답의 `ok: false`로 돌려줍니다.
///
/// # Endpoint
/// `POST /api/v1/auth/register`
#[post("/register")]
pub async fn register(
    user_service: web::Data<UserService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = user_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login` → `{ "token": "...", "refreshToken": "..." }`
#[post("/login")]
pub async fn login(
    user_service: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let tokens = user_service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// 명시적 토큰 갱신 핸들러
///
/// 게이트웨이의 조용한 갱신과 같은 규칙을 따릅니다. 저장소 장애는 503입니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    token_service: web::Data<TokenService>,
    user_store: web::Data<dyn UserStore>,
    payload: web::Json<RefreshTokensRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let session = token_service
        .refresh(&payload.token, &payload.refresh_token, user_store.get_ref())
        .await
        .map_err(|e| {
            log::warn!("토큰 갱신 실패: {}", e);
            e
        })?;

    log::info!("토큰 갱신 성공: 사용자 ID {}", session.user.id);
    Ok(HttpResponse::Ok().json(session.tokens))
}

/// Facebook 로그인 시작
///
/// # Endpoint
/// `GET /flogin` → 302 Facebook 로그인 다이얼로그
#[get("/flogin")]
pub async fn facebook_login(
    facebook_service: web::Data<FacebookAuthService>,
) -> Result<HttpResponse, AppError> {
    let url_response = facebook_service.get_login_url()?;

    Ok(HttpResponse::Found()
        .append_header((header::LOCATION, url_response.login_url))
        .finish())
}

/// Facebook OAuth 콜백 처리
///
/// 계정을 준비한 뒤 토큰 쌍을 쿼리스트링에 담아 클라이언트 `/home`으로 보냅니다.
///
/// # Endpoint
/// `GET /auth/facebook/callback?code={code}&state={state}`
#[get("/auth/facebook/callback")]
pub async fn facebook_callback(
    facebook_service: web::Data<FacebookAuthService>,
    user_service: web::Data<UserService>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    if let Some(error) = &query.error {
        let error_msg = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("Facebook OAuth 에러: {} - {}", error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = facebook_service
        .authenticate_with_code(&query.code, &query.state)
        .await?;
    let tokens = user_service.issue_tokens(&user)?;

    log::info!("Facebook 로그인 성공: 사용자 ID {}", user.id);

    let location = format!(
        "{}/home?token={}&refreshToken={}",
        ClientConfig::origin(),
        urlencoding::encode(&tokens.token),
        urlencoding::encode(&tokens.refresh_token)
    );

    Ok(HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .finish())
}
