//! 라우트 설정 모듈
//!
//! 핸들러를 URL 스코프에 묶고, 스코프마다 필요한 게이트웨이 모드를 적용합니다.
//!
//! | 스코프 | 게이트웨이 |
//! |--------|-----------|
//! | `/health` | 없음 |
//! | `/api/v1/auth` | 없음 |
//! | `/api/v1/me` | optional |
//! | `/api/v1/account` | required |
//! | `/flogin`, `/auth/facebook/callback` | 없음 |

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// 핸들러가 쓰는 서비스는 [`crate::services::AppServices::configure`]로 먼저 등록되어 있어야 합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let app = App::new()
///     .configure(|cfg| services.configure(cfg))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_facebook_routes(cfg);
}

/// 토큰을 발급하는 공개 엔드포인트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"secret1"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_tokens),
    );
}

/// 사용자 라우트
///
/// ```bash
/// curl http://localhost:8080/api/v1/me \
///   -H "x-token: eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." \
///   -H "x-refresh-token: eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthMiddleware::optional())
            .service(handlers::users::me),
    );

    cfg.service(
        web::scope("/api/v1/account")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::forget_password)
            .service(handlers::users::revoke_all_sessions),
    );
}

fn configure_facebook_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::facebook_login)
        .service(handlers::auth::facebook_callback);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "suggestion_board_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": { "database": "MongoDB", "auth": "JWT (HS256) + Facebook OAuth" }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "auth": "JWT (HS256) + Facebook OAuth"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
    }
}
