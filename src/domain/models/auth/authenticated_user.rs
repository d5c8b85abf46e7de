use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::models::token::UserPayload;

/// 게이트웨이가 확인한 요청 주체
///
/// 인증 미들웨어가 request extension에 넣고, 핸들러는 추출자로 꺼내 씁니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: Option<String>,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// 본인 또는 관리자인지 확인
    pub fn can_act_for(&self, user_id: i64) -> bool {
        self.is_admin || self.id == user_id
    }
}

impl From<UserPayload> for AuthenticatedUser {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: payload.id,
            username: payload.username,
            is_admin: payload.is_admin,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자 (익명이면 `None`)
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
