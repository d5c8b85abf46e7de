//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue, ACCESS_CONTROL_EXPOSE_HEADERS};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::{AuthMode, AuthenticatedUser};
use crate::domain::models::token::TokenPair;
use crate::errors::AuthError;
use crate::middlewares::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();

        Box::pin(async move {
            let token_service = req.app_data::<web::Data<TokenService>>().cloned();
            let user_store = req.app_data::<web::Data<dyn UserStore>>().cloned();

            let (Some(token_service), Some(user_store)) = (token_service, user_store) else {
                log::error!("인증 미들웨어 설정 오류: TokenService 또는 UserStore가 등록되지 않았습니다");
                let response = HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            let access_token = header_value(&req, ACCESS_TOKEN_HEADER);
            let refresh_token = header_value(&req, REFRESH_TOKEN_HEADER);

            let outcome = token_service
                .resolve(
                    access_token.as_deref(),
                    refresh_token.as_deref(),
                    user_store.get_ref(),
                )
                .await;

            let refreshed = match (&mode, outcome) {
                (_, Ok(principal)) => {
                    log::debug!("인증 성공: 사용자 ID {}", principal.user.id);
                    req.extensions_mut()
                        .insert(AuthenticatedUser::from(principal.user));
                    principal.refreshed
                }
                (AuthMode::Required, Err(err)) => {
                    let response = rejection(&err);
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                (AuthMode::Optional, Err(err)) => {
                    if err.is_transient() {
                        log::warn!("선택적 인증: 저장소 장애로 익명 진행 ({})", err);
                    } else {
                        log::debug!("선택적 인증: 익명 진행 ({})", err);
                    }
                    None
                }
            };

            let mut res = service.call(req).await?;
            if let Some(pair) = refreshed {
                attach_tokens(&mut res, &pair);
            }
            Ok(res.map_into_left_body())
        })
    }
}

fn header_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
}

/// Required 모드의 거부 응답 (저장소 장애는 503)
fn rejection(err: &AuthError) -> HttpResponse {
    if err.is_transient() {
        log::warn!("인증 보류: {}", err);
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "service_unavailable",
            "message": "잠시 후 다시 시도해주세요"
        }))
    } else {
        log::warn!("인증 실패: {}", err);
        HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "authentication_required",
            "message": err.to_string()
        }))
    }
}

/// 재발급된 토큰 쌍을 응답 헤더에 싣습니다.
fn attach_tokens<B>(res: &mut ServiceResponse<B>, pair: &TokenPair) {
    let headers = res.headers_mut();

    for (name, value) in [
        (ACCESS_TOKEN_HEADER, pair.token.as_str()),
        (REFRESH_TOKEN_HEADER, pair.refresh_token.as_str()),
    ] {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(HeaderName::from_static(name), value);
            }
            Err(e) => log::error!("토큰 헤더 생성 실패 ({}): {}", name, e),
        }
    }

    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("x-token, x-refresh-token"),
    );
}
