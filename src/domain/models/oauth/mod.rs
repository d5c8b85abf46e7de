//! OAuth 프로바이더 응답 모델

pub mod facebook_oauth_model;

pub use facebook_oauth_model::{FacebookProfile, FacebookTokenResponse, OAuthLoginUrlResponse};
