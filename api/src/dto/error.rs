//! Error body helpers shared by handlers and middleware

use actix_web::http::StatusCode;
use validator::ValidationErrors;

use re_shared::errors::error_codes;
pub use re_shared::errors::ErrorResponse;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(status).json(self)
    }
}

/// 400 body listing the messages of every failed field, keyed by field name
pub fn validation_error_response(errors: &ValidationErrors) -> ErrorResponse {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields.into_iter().fold(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "One or more fields are invalid"),
        |response, (field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            response.add_detail(field.to_string(), messages)
        },
    )
}
