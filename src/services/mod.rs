//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 만들어져 `web::Data`로 핸들러와 미들웨어에 주입됩니다.
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 수명주기 ([`auth::TokenService`])
//! - Facebook OAuth 2.0 로그인 ([`auth::FacebookAuthService`])
//! - 로컬 가입/로그인, 비밀번호 재설정, 세션 폐기 ([`users::UserService`])
//!
//! # Examples
//!
//! ```rust,ignore
//! let token_service = TokenService::from_config()?;
//! let user_service = UserService::new(user_repo.clone(), token_service.clone());
//! ```

pub mod auth;
pub mod users;

use std::sync::Arc;

use actix_web::web;

use crate::repositories::users::{UserRepository, UserStore};
use auth::{FacebookAuthService, TokenService};
use users::UserService;

/// 핸들러와 미들웨어가 공유하는 서비스 묶음
///
/// 하나의 저장소 인스턴스를 토큰 관리자(읽기 전용 `UserStore`)와 계정 서비스(`UserRepository`)가 함께 씁니다.
#[derive(Clone)]
pub struct AppServices {
    pub token_service: web::Data<TokenService>,
    pub user_store: web::Data<dyn UserStore>,
    pub user_service: web::Data<UserService>,
    pub facebook_auth_service: web::Data<FacebookAuthService>,
}

impl AppServices {
    pub fn new<R>(
        user_repo: Arc<R>,
        token_service: TokenService,
        bcrypt_cost: u32,
        oauth_state_secret: String,
    ) -> Self
    where
        R: UserRepository + 'static,
    {
        let user_store: Arc<dyn UserStore> = user_repo.clone();
        let user_repo: Arc<dyn UserRepository> = user_repo;

        let user_service = UserService::new(user_repo.clone(), token_service.clone())
            .with_bcrypt_cost(bcrypt_cost);

        Self {
            token_service: web::Data::new(token_service),
            user_store: web::Data::from(user_store),
            user_service: web::Data::new(user_service),
            facebook_auth_service: web::Data::new(FacebookAuthService::new(
                user_repo,
                oauth_state_secret,
            )),
        }
    }

    /// 앱 데이터 등록
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.token_service.clone())
            .app_data(self.user_store.clone())
            .app_data(self.user_service.clone())
            .app_data(self.facebook_auth_service.clone());
    }
}
