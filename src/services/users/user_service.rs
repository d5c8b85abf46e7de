//! # 사용자 계정 서비스
//!
//! 로컬 가입/로그인과 세션 폐기를 담당합니다.
//!
//! ## 세션 폐기
//!
//! 서버는 발급한 토큰을 기억하지 않습니다. 사용자의 `refresh_secret`을 바꾸면
//! 그 사용자의 리프레시 토큰이 모두 검증에 실패하고, 남은 액세스 토큰은 수명이 다하면 끝납니다.
//!
//! | 연산 | 저장소 쓰기 |
//! |------|-------------|
//! | `forget_password` | 비밀번호 해시 + refresh secret (한 번의 업데이트) |
//! | `revoke_all_sessions` | refresh secret |
//! | `login` / `register` | 없음 / 사용자 생성 |

use std::sync::Arc;

use validator::Validate;

use crate::config::PasswordConfig;
use crate::domain::dto::users::request::{ForgetPasswordRequest, LoginRequest, RegisterRequest};
use crate::domain::dto::users::response::{FieldError, RegisterResponse, UserResponse};
use crate::domain::entities::users::{new_refresh_secret, NewUser, User};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::UserRepository;
use crate::services::auth::TokenService;

const INVALID_LOGIN: &str = "잘못된 이메일 또는 비밀번호입니다";

/// 사용자 계정 서비스
///
/// # Examples
///
/// ```rust,ignore
/// let user_service = UserService::new(user_repo.clone(), token_service.clone());
/// let tokens = user_service.login(request).await?;
/// ```
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    token_service: TokenService,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }

    /// 해싱 비용 지정
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let hash_start = std::time::Instant::now();
        let password_hash = bcrypt::hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        Ok(password_hash)
    }

    /// 이메일/패스워드 회원가입
    ///
    /// 입력 검증 실패와 이메일 중복은 에러가 아니라 `ok: false` 응답으로 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 저장소 오류
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        if let Err(errors) = request.validate() {
            return Ok(RegisterResponse::failure(FieldError::from_validation(&errors)));
        }

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Ok(RegisterResponse::failure(vec![email_taken()]));
        }

        let password_hash = self.hash_password(&request.password)?;
        // 관리자 권한은 저장소에서 직접 부여
        let new_user = NewUser::local(request.username, request.email, password_hash, false);

        match self.user_repo.create(new_user).await {
            Ok(user) => {
                log::info!("회원가입 완료: 사용자 {}", user.id);
                Ok(RegisterResponse::success(UserResponse::from(user)))
            }
            // 조회와 생성 사이에 같은 이메일이 먼저 저장된 경우
            Err(AppError::ConflictError(_)) => Ok(RegisterResponse::failure(vec![email_taken()])),
            Err(e) => Err(e),
        }
    }

    /// 이메일/패스워드 로그인
    ///
    /// 없는 이메일, 비밀번호 불일치, Facebook 전용 계정 모두 같은 메시지로 실패합니다.
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenPair> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_LOGIN.to_string()))?;

        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(AppError::AuthenticationError(INVALID_LOGIN.to_string()));
        };

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(&request.password, password_hash).context("비밀번호 검증 실패")?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::AuthenticationError(INVALID_LOGIN.to_string()));
        }

        log::info!("로그인 성공: 사용자 {}", user.id);
        self.issue_tokens(&user)
    }

    /// 저장된 사용자에게 토큰 쌍 발급
    pub fn issue_tokens(&self, user: &User) -> AppResult<TokenPair> {
        Ok(self.token_service.issue(user)?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.user_repo.find_user_by_id(id).await
    }

    /// 비밀번호 재설정
    ///
    /// 새 해시와 새 refresh secret을 한 번에 기록하므로 성공 즉시 기존 리프레시 토큰이 무효가 됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 비밀번호 길이 오류
    /// * `AppError::AuthorizationError` - 본인도 관리자도 아님
    /// * `AppError::NotFound` - 대상 사용자 없음
    pub async fn forget_password(
        &self,
        actor: &AuthenticatedUser,
        request: ForgetPasswordRequest,
    ) -> AppResult<bool> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if !actor.can_act_for(request.user_id) {
            return Err(AppError::AuthorizationError(
                "다른 사용자의 비밀번호를 변경할 수 없습니다".to_string(),
            ));
        }

        let password_hash = self.hash_password(&request.new_password)?;
        let updated = self
            .user_repo
            .update_password(request.user_id, &password_hash, &new_refresh_secret())
            .await?;

        if !updated {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!(
            "비밀번호 재설정: 사용자 {} (요청자 {})",
            request.user_id,
            actor.id
        );
        Ok(true)
    }

    /// 사용자의 모든 리프레시 토큰 무효화
    pub async fn revoke_all_sessions(&self, user_id: i64) -> AppResult<bool> {
        let rotated = self
            .user_repo
            .rotate_refresh_secret(user_id, &new_refresh_secret())
            .await?;

        if !rotated {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("모든 세션 폐기: 사용자 {}", user_id);
        Ok(true)
    }
}

fn email_taken() -> FieldError {
    FieldError::new("email", "이미 사용 중인 이메일입니다")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::token::{TokenLifetimes, UserPayload};
    use crate::errors::AuthError;
    use crate::repositories::users::{InMemoryUserRepository, UserStore};

    fn setup() -> (Arc<InMemoryUserRepository>, UserService) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let tokens = TokenService::new("test-secret", TokenLifetimes::default()).unwrap();
        let service = UserService::new(repo.clone(), tokens).with_bcrypt_cost(4);
        (repo, service)
    }

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_and_login() {
        let (_, service) = setup();

        let registered = service.register(register_request("alice", "a@x.io")).await.unwrap();
        assert!(registered.ok);
        let user = registered.user.unwrap();
        assert_eq!(user.username.as_deref(), Some("alice"));

        let pair = service.login(login_request("a@x.io", "secret1")).await.unwrap();
        let token_service = TokenService::new("test-secret", TokenLifetimes::default()).unwrap();
        assert_eq!(token_service.verify_access(&pair.token).unwrap().id, user.id);
    }

    #[actix_web::test]
    async fn test_register_reports_field_errors() {
        let (_, service) = setup();

        let invalid = service.register(register_request("a!", "nope")).await.unwrap();
        assert!(!invalid.ok);
        assert!(invalid.user.is_none());
        assert!(invalid.errors.iter().any(|e| e.path == "username"));
        assert!(invalid.errors.iter().any(|e| e.path == "email"));

        service.register(register_request("alice", "a@x.io")).await.unwrap();
        let duplicate = service.register(register_request("bob", "a@x.io")).await.unwrap();
        assert!(!duplicate.ok);
        assert_eq!(duplicate.errors, vec![email_taken()]);
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let (repo, service) = setup();
        service.register(register_request("alice", "a@x.io")).await.unwrap();
        repo.create(NewUser::facebook("fb-1".into(), Some("fb@x.io".into())))
            .await
            .unwrap();

        for (email, password) in [("a@x.io", "wrong!"), ("nobody@x.io", "secret1"), ("fb@x.io", "secret1")] {
            match service.login(login_request(email, password)).await {
                Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, INVALID_LOGIN),
                other => panic!("unexpected: {:?}", other.map(|_| ())),
            }
        }
    }

    #[actix_web::test]
    async fn test_forget_password_rotates_refresh_secret() {
        let (repo, service) = setup();
        let user_id = service
            .register(register_request("alice", "a@x.io"))
            .await
            .unwrap()
            .user
            .unwrap()
            .id;
        let before = repo.find_user_by_id(user_id).await.unwrap().unwrap();
        let old_pair = service.issue_tokens(&before).unwrap();

        let actor = AuthenticatedUser::from(UserPayload::with_id(user_id));
        let request = ForgetPasswordRequest {
            user_id,
            new_password: "newpass".to_string(),
        };
        assert!(service.forget_password(&actor, request).await.unwrap());

        let after = repo.find_user_by_id(user_id).await.unwrap().unwrap();
        assert_ne!(after.refresh_secret, before.refresh_secret);
        assert!(service.login(login_request("a@x.io", "newpass")).await.is_ok());
        assert!(service.login(login_request("a@x.io", "secret1")).await.is_err());

        let token_service = TokenService::new("test-secret", TokenLifetimes::default()).unwrap();
        let result = token_service
            .refresh(&old_pair.token, &old_pair.refresh_token, repo.as_ref())
            .await;
        assert_eq!(result, Err(AuthError::InvalidRefreshToken));
    }

    #[actix_web::test]
    async fn test_forget_password_requires_owner_or_admin() {
        let (_, service) = setup();
        let user_id = service
            .register(register_request("alice", "a@x.io"))
            .await
            .unwrap()
            .user
            .unwrap()
            .id;
        let request = || ForgetPasswordRequest {
            user_id,
            new_password: "newpass".to_string(),
        };

        let stranger = AuthenticatedUser::from(UserPayload::with_id(user_id + 1));
        assert!(matches!(
            service.forget_password(&stranger, request()).await,
            Err(AppError::AuthorizationError(_))
        ));

        let admin = AuthenticatedUser {
            id: 999,
            username: Some("root".into()),
            is_admin: true,
        };
        assert!(service.forget_password(&admin, request()).await.unwrap());

        let missing = ForgetPasswordRequest {
            user_id: 4242,
            new_password: "newpass".to_string(),
        };
        assert!(matches!(
            service.forget_password(&admin, missing).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_revoke_all_sessions() {
        let (repo, service) = setup();
        let user = repo
            .create(NewUser::facebook("fb-1".into(), None))
            .await
            .unwrap();

        assert!(service.revoke_all_sessions(user.id).await.unwrap());
        let rotated = repo.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(rotated.refresh_secret, user.refresh_secret);

        assert!(matches!(
            service.revoke_all_sessions(4242).await,
            Err(AppError::NotFound(_))
        ));
    }
}
