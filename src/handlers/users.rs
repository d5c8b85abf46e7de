//! User HTTP Handlers
//!
//! 현재 사용자 조회와 계정 보안(비밀번호 재설정, 세션 폐기) 엔드포인트입니다.
//!
//! | 경로 | 게이트웨이 |
//! |------|-----------|
//! | `GET /api/v1/me` | optional (익명이면 `null`) |
//! | `POST /api/v1/account/forget-password` | required |
//! | `POST /api/v1/account/revoke-all` | required |
use actix_web::{get, post, web, HttpResponse};

use crate::domain::dto::users::request::ForgetPasswordRequest;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::errors::AppError;
use crate::services::users::UserService;

/// 현재 사용자 조회
///
/// 익명 요청이거나 토큰의 사용자가 더 이상 없으면 `null`을 돌려줍니다.
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn me(
    user_service: web::Data<UserService>,
    current: OptionalUser,
) -> Result<HttpResponse, AppError> {
    let Some(current) = current.0 else {
        return Ok(HttpResponse::Ok().json(Option::<UserResponse>::None));
    };

    let user = user_service
        .find_by_id(current.id)
        .await?
        .map(UserResponse::from);

    Ok(HttpResponse::Ok().json(user))
}

/// 비밀번호 재설정
///
/// 본인 또는 관리자만 호출할 수 있습니다. 성공하면 대상 사용자의 기존 세션이 모두 끊깁니다.
///
/// # Endpoint
/// `POST /api/v1/account/forget-password`
#[post("/forget-password")]
pub async fn forget_password(
    user_service: web::Data<UserService>,
    current: AuthenticatedUser,
    payload: web::Json<ForgetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let changed = user_service
        .forget_password(&current, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(changed))
}

/// 현재 사용자의 모든 세션 폐기
///
/// # Endpoint
/// `POST /api/v1/account/revoke-all`
#[post("/revoke-all")]
pub async fn revoke_all_sessions(
    user_service: web::Data<UserService>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let revoked = user_service.revoke_all_sessions(current.id).await?;
    Ok(HttpResponse::Ok().json(revoked))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::domain::entities::users::NewUser;
    use crate::domain::models::token::{TokenLifetimes, TokenPair};
    use crate::middlewares::ACCESS_TOKEN_HEADER;
    use crate::repositories::users::{InMemoryUserRepository, UserRepository};
    use crate::routes::configure_all_routes;
    use crate::services::auth::TokenService;
    use crate::services::AppServices;

    async fn seeded() -> (Arc<InMemoryUserRepository>, AppServices, TokenPair) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = repo
            .create(NewUser::local("alice".into(), "a@x.io".into(), "unused".into(), false))
            .await
            .unwrap();
        let token_service = TokenService::new("users-test-secret", TokenLifetimes::default()).unwrap();
        let pair = token_service.issue(&user).unwrap();
        let services = AppServices::new(repo.clone(), token_service, 4, "state-secret".to_string());
        (repo, services, pair)
    }

    #[actix_web::test]
    async fn test_me_is_null_for_anonymous() {
        let (_, services, _) = seeded().await;
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/me").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body.is_null());
    }

    #[actix_web::test]
    async fn test_me_returns_current_user() {
        let (_, services, pair) = seeded().await;
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header((ACCESS_TOKEN_HEADER, pair.token.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["email"], "a@x.io");
        assert_eq!(body["authProvider"], "local");
    }

    #[actix_web::test]
    async fn test_account_routes_require_authentication() {
        let (_, services, _) = seeded().await;
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/account/revoke-all")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_forget_password_for_another_user_is_forbidden() {
        let (repo, services, pair) = seeded().await;
        let other = repo
            .create(NewUser::facebook("fb-9".into(), None))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/account/forget-password")
            .insert_header((ACCESS_TOKEN_HEADER, pair.token.as_str()))
            .set_json(json!({"userId": other.id, "newPassword": "newpass"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }

    #[actix_web::test]
    async fn test_self_registered_admin_cannot_reset_other_password() {
        let (repo, services, _) = seeded().await;
        let victim = repo.find_by_email("a@x.io").await.unwrap().unwrap();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": "mallory",
                "email": "m@x.io",
                "password": "secret1",
                "isAdmin": true
            }))
            .to_request();
        let registered: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(registered["ok"], true);
        assert_eq!(registered["user"]["isAdmin"], false);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "m@x.io", "password": "secret1"}))
            .to_request();
        let tokens: Value = test::call_and_read_body_json(&app, req).await;
        let token = tokens["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/v1/account/forget-password")
            .insert_header((ACCESS_TOKEN_HEADER, token.as_str()))
            .set_json(json!({"userId": victim.id, "newPassword": "owned1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);

        let after = repo.find_by_email("a@x.io").await.unwrap().unwrap();
        assert_eq!(after.refresh_secret, victim.refresh_secret);
        assert_eq!(after.password_hash, victim.password_hash);
    }

    #[actix_web::test]
    async fn test_revoke_all_rotates_secret() {
        let (repo, services, pair) = seeded().await;
        let before = repo.find_by_email("a@x.io").await.unwrap().unwrap();
        let app = test::init_service(
            App::new()
                .configure(|cfg| services.configure(cfg))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/account/revoke-all")
            .insert_header((ACCESS_TOKEN_HEADER, pair.token.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!(true));

        let after = repo.find_by_email("a@x.io").await.unwrap().unwrap();
        assert_ne!(after.refresh_secret, before.refresh_secret);
    }
}
