use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Invalid Input: {0}")]
    InvalidInputError(String),

    #[error("Configuration Missing: {0}")]
    ConfigurationMissingError(String),

    #[error("Please wait {0}s before requesting a new OTP")]
    CooldownActiveError(u64),

    #[error("Delivery Failure: {0}")]
    DeliveryFailureError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::InvalidInputError(..) => StatusCode::BAD_REQUEST,
            CustomError::ConfigurationMissingError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::CooldownActiveError(..) => StatusCode::TOO_MANY_REQUESTS,
            CustomError::DeliveryFailureError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::NotFoundError(..) => StatusCode::NOT_FOUND,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_message = json!({
            "success": false,
            "message": self.to_string(),
            "httpStatusCode": self.status_code().as_u16(),
            "error": match *self {
                CustomError::InvalidInputError(..) => "INVALID_INPUT_ERROR",
                CustomError::ConfigurationMissingError(..) => "CONFIGURATION_MISSING_ERROR",
                CustomError::CooldownActiveError(..) => "COOLDOWN_ACTIVE_ERROR",
                CustomError::DeliveryFailureError(..) => "DELIVERY_FAILURE_ERROR",
                CustomError::NotFoundError(..) => "NOT_FOUND_ERROR",
                CustomError::InternalServerError(..) => "INTERNAL_SERVER_ERROR",
            },
            "service": std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string()),
        });

        HttpResponse::build(self.status_code()).json(error_message)
    }
}
