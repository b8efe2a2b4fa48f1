use super::controller::{allocate_id, check_unique, country_code, state_code};
use actix_web::web;

pub fn id_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/id-cards")
            .route("/allocate", web::post().to(allocate_id))
            .route("/is-unique", web::get().to(check_unique))
            .route("/state-code", web::get().to(state_code))
            .route("/country-code", web::get().to(country_code)),
    );
}
