use actix_web::HttpResponse;

use crate::dto::submissions::ErrorResponse;
use crate::services::ServiceError;

pub mod api;

/// Translate a service error into the JSON error contract.
///
/// Validation problems are the client's fault; everything else is reported
/// with a coarse server-side status. No caught failure is silent.
pub fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("Product not found"))
        }
        ServiceError::Render(message) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(message))
        }
        ServiceError::Upstream(message) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(message))
        }
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
                "Failed to {context}"
            )))
        }
    }
}
