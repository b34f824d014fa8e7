use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::services::fetching::FetchError;

/// Fatal pipeline failures, surfaced as a flat text 500.
///
/// Anything recoverable (unparseable dates, missing optional fields, failed
/// HEAD probes) is handled inside the services and never reaches this type.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Unable to fetch articles: {0}")]
    Fetch(#[from] FetchError),
    #[error("Unable to create RSS: {0}")]
    Rss(#[from] rss::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
