use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("an account with this email already exists, try logging in")]
    DuplicateEmail,
    #[error("no account matches this email")]
    UnknownEmail,
    #[error("password is incorrect, try again")]
    BadPassword,
    #[error("you need to log in or register to do that")]
    Unauthenticated,
    #[error("you do not have permission to do that")]
    Forbidden,
    #[error("post not found: {0}")]
    PostNotFound(i64),
    #[error("user not found: {0}")]
    UserNotFound(i64),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::DuplicateEmail => StatusCode::CONFLICT,
            DomainError::UnknownEmail | DomainError::BadPassword => StatusCode::UNAUTHORIZED,
            DomainError::Unauthenticated => StatusCode::SEE_OTHER,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::PostNotFound(_) | DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::PostNotFound(id) | DomainError::UserNotFound(id) => {
                Some(json!({ "resource": id }))
            }
            DomainError::Validation(fields) => Some(json!({ "fields": fields })),
            _ => None,
        };

        let mut builder = HttpResponse::build(self.status_code());
        // Authentication failures surface a message and send the caller
        // to the login page.
        match self {
            DomainError::Unauthenticated
            | DomainError::DuplicateEmail
            | DomainError::UnknownEmail
            | DomainError::BadPassword => {
                builder.insert_header((header::LOCATION, "/login"));
            }
            _ => {}
        }

        builder.json(ErrorBody {
            error: message.as_str(),
            details,
        })
    }
}
