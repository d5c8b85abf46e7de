//! 토큰 게이트웨이 미들웨어
//!
//! `x-token` / `x-refresh-token` 헤더로 요청 주체를 결정합니다.
//! 액세스 토큰이 만료되었고 리프레시 토큰이 유효하면 같은 요청 안에서 조용히 재발급하고,
//! 새 토큰 쌍을 응답 헤더로 돌려줍니다.
//!
//! 미들웨어는 앱 데이터에서 `web::Data<TokenService>`와 `web::Data<dyn UserStore>`를 꺼내 씁니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 토큰 게이트웨이 미들웨어
///
/// | 모드 | 인증 실패 | 저장소 장애 |
/// |------|-----------|-------------|
/// | `required()` | 401 | 503 |
/// | `optional()` | 익명으로 진행 | 익명으로 진행 (warn 로그) |
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 인증된 주체가 반드시 필요한 스코프용
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 익명 접근을 허용하는 스코프용
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, web, App, HttpResponse};
    use chrono::Duration;

    use super::*;
    use crate::domain::entities::users::{NewUser, User};
    use crate::domain::models::auth::OptionalUser;
    use crate::domain::models::token::{TokenLifetimes, TokenPair};
    use crate::middlewares::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
    use crate::repositories::users::{InMemoryUserRepository, UserStore};
    use crate::services::auth::TokenService;

    const SECRET: &str = "gateway-test-secret";

    async fn whoami(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().json(user.0.map(|u| u.id))
    }

    macro_rules! gateway_app {
        ($store:expr, $middleware:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(
                        TokenService::new(SECRET, TokenLifetimes::default()).unwrap(),
                    ))
                    .app_data(web::Data::from($store.clone() as Arc<dyn UserStore>))
                    .service(
                        web::scope("/p")
                            .wrap($middleware)
                            .route("/whoami", web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    fn seeded_user() -> User {
        let mut user = NewUser::facebook("fb-1".into(), None);
        user.refresh_secret = "R1".into();
        user.into_user(1)
    }

    fn store_with_user() -> Arc<InMemoryUserRepository> {
        let store = Arc::new(InMemoryUserRepository::new());
        store.insert(seeded_user()).unwrap();
        store
    }

    fn issue(lifetimes: TokenLifetimes) -> TokenPair {
        TokenService::new(SECRET, lifetimes)
            .unwrap()
            .issue(&seeded_user())
            .unwrap()
    }

    fn expired() -> TokenLifetimes {
        TokenLifetimes::new(Duration::hours(-1), Duration::days(7))
    }

    fn request(pair: Option<&TokenPair>, refresh: Option<&str>) -> test::TestRequest {
        let mut req = test::TestRequest::get().uri("/p/whoami");
        if let Some(pair) = pair {
            req = req.insert_header((ACCESS_TOKEN_HEADER, pair.token.as_str()));
        }
        if let Some(refresh) = refresh {
            req = req.insert_header((REFRESH_TOKEN_HEADER, refresh));
        }
        req
    }

    #[actix_web::test]
    async fn test_required_rejects_missing_token() {
        let store = store_with_user();
        let app = gateway_app!(store, AuthMiddleware::required());

        let resp = test::call_service(&app, request(None, None).to_request()).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_valid_access_token_passes_without_refresh() {
        let store = store_with_user();
        let app = gateway_app!(store, AuthMiddleware::required());
        let pair = issue(TokenLifetimes::default());

        let resp = test::call_service(&app, request(Some(&pair), None).to_request()).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get(ACCESS_TOKEN_HEADER).is_none());

        let body: Option<i64> = test::read_body_json(resp).await;
        assert_eq!(body, Some(1));
    }

    #[actix_web::test]
    async fn test_expired_access_token_is_refreshed_silently() {
        let store = store_with_user();
        let app = gateway_app!(store, AuthMiddleware::required());
        let pair = issue(expired());

        let req = request(Some(&pair), Some(&pair.refresh_token)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let new_token = resp.headers().get(ACCESS_TOKEN_HEADER).unwrap().to_str().unwrap();
        let service = TokenService::new(SECRET, TokenLifetimes::default()).unwrap();
        assert_eq!(service.verify_access(new_token).unwrap().id, 1);
        assert!(resp.headers().get(REFRESH_TOKEN_HEADER).is_some());
        assert_eq!(
            resp.headers().get("access-control-expose-headers").unwrap(),
            "x-token, x-refresh-token"
        );
    }

    #[actix_web::test]
    async fn test_invalid_refresh_token_is_unauthorized() {
        let store = store_with_user();
        let app = gateway_app!(store, AuthMiddleware::required());
        let pair = issue(expired());

        let resp = test::call_service(&app, request(Some(&pair), Some("bogus")).to_request()).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_store_outage_maps_to_503_when_required() {
        let store = store_with_user();
        let app = gateway_app!(store, AuthMiddleware::required());
        let pair = issue(expired());
        store.set_unavailable(true);

        let req = request(Some(&pair), Some(&pair.refresh_token)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
    }

    #[actix_web::test]
    async fn test_optional_mode_degrades_to_anonymous() {
        let store = store_with_user();
        let app = gateway_app!(store, AuthMiddleware::optional());
        let pair = issue(expired());

        let resp = test::call_service(&app, request(None, None).to_request()).await;
        assert_eq!(resp.status(), 200);
        let body: Option<i64> = test::read_body_json(resp).await;
        assert_eq!(body, None);

        store.set_unavailable(true);
        let req = request(Some(&pair), Some(&pair.refresh_token)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Option<i64> = test::read_body_json(resp).await;
        assert_eq!(body, None);
    }
}
