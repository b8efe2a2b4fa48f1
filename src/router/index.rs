use crate::idgen::index::id_routes;
use crate::otp::index::otp_routes;
use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(otp_routes);
    cfg.configure(id_routes);
}
