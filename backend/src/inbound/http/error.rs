//! HTTP adapter mapping for domain errors.
//!
//! Errors render as plain text `Error: <message>` with a status derived from
//! the [`ErrorCode`] and the request's trace id in the `trace-id` header.
//! Internal errors are logged in full and redacted in the body.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        "Internal server error"
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                trace_id = self.trace_id().unwrap_or("-"),
                message = self.message(),
                "internal error"
            );
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder
            .content_type(ContentType::plaintext())
            .body(format!("Error: {}", public_message(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    async fn body_of(error: &Error) -> String {
        let bytes = to_bytes(error.error_response().into_body())
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[rstest]
    #[case(Error::invalid_request("age must be a number, got `abc`"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Invalid username or password"), StatusCode::UNAUTHORIZED)]
    #[case(Error::conflict("username `ann` is already taken"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn renders_plain_text_with_status(#[case] error: Error, #[case] status: StatusCode) {
        let response = error.error_response();
        assert_eq!(response.status(), status);
        assert_eq!(body_of(&error).await, format!("Error: {}", error.message()));
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_but_keep_trace_id() {
        let error = Error::internal("sqlite: disk I/O error").with_trace_id("abc");
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("abc")
        );
        assert_eq!(body_of(&error).await, "Error: Internal server error");
    }
}
