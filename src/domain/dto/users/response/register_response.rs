use serde::Serialize;
use validator::ValidationErrors;

use super::user_response::UserResponse;

/// 필드 단위 에러
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// validator 에러를 경로순으로 정렬된 필드 에러 목록으로 변환
    pub fn from_validation(errors: &ValidationErrors) -> Vec<FieldError> {
        let mut out: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let path = field.to_string();
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldError::new(path.clone(), message)
                })
            })
            .collect();

        out.sort_by(|a, b| a.path.cmp(&b.path));
        out
    }
}

/// 회원가입 결과
///
/// 검증/중복 실패는 `ok: false`와 필드 에러로 표현합니다.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub errors: Vec<FieldError>,
    pub user: Option<UserResponse>,
}

impl RegisterResponse {
    pub fn success(user: UserResponse) -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            user: Some(user),
        }
    }

    pub fn failure(errors: Vec<FieldError>) -> Self {
        Self {
            ok: false,
            errors,
            user: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::RegisterRequest;
    use validator::Validate;

    #[test]
    fn test_field_errors_from_validation() {
        let request = RegisterRequest {
            username: "ok123".into(),
            email: "broken".into(),
            password: "12".into(),
        };
        let errors = FieldError::from_validation(&request.validate().unwrap_err());

        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["email", "password"]);
        assert!(errors.iter().all(|e| !e.message.is_empty()));
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(RegisterResponse::failure(vec![FieldError::new(
            "email",
            "taken",
        )]))
        .unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["errors"][0]["path"], "email");
        assert!(json["user"].is_null());
    }
}
