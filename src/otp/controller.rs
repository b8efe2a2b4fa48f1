use crate::otp::model::{EmailQuery, SendOtpRequest, VerifyOtpRequest};
use crate::otp::service::OtpService;
use crate::utils::error::CustomError;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

pub async fn send_otp(
    otp_service: web::Data<OtpService>,
    body: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, CustomError> {
    // The code itself is never echoed back over HTTP
    otp_service.generate_and_send_otp(&body.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "OTP sent successfully"
    })))
}

pub async fn verify_otp(
    otp_service: web::Data<OtpService>,
    body: web::Json<VerifyOtpRequest>,
) -> impl Responder {
    let verified = otp_service.verify_otp(&body.email, &body.code).await;

    if verified {
        HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Email verified successfully",
            "verified": true
        }))
    } else {
        HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid or expired OTP",
            "verified": false
        }))
    }
}

pub async fn otp_status(
    otp_service: web::Data<OtpService>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    let verified = otp_service.is_email_verified(&query.email).await;
    let remaining = otp_service.remaining_cooldown(&query.email).await;

    HttpResponse::Ok().json(json!({
        "success": true,
        "verified": verified,
        "remaining_cooldown": remaining
    }))
}

pub async fn clear_verification(
    otp_service: web::Data<OtpService>,
    body: web::Json<SendOtpRequest>,
) -> impl Responder {
    otp_service.clear_email_verification(&body.email).await;

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Verification cleared"
    }))
}
