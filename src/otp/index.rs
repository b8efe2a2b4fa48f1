use super::controller::{clear_verification, otp_status, send_otp, verify_otp};
use actix_web::web;

pub fn otp_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/otp")
            .route("/send", web::post().to(send_otp))
            .route("/verify", web::post().to(verify_otp))
            .route("/status", web::get().to(otp_status))
            .route("/clear", web::post().to(clear_verification)),
    );
}
