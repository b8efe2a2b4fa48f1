use crate::idgen::model::{AllocateIdRequest, CardIdQuery, NameQuery};
use crate::idgen::service::IdGenerationService;
use crate::utils::error::CustomError;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

pub async fn allocate_id(
    id_service: web::Data<IdGenerationService>,
    body: web::Json<AllocateIdRequest>,
) -> Result<HttpResponse, CustomError> {
    let card_id = id_service.allocate(body.code_type).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Card ID generated successfully",
        "card_id": card_id
    })))
}

pub async fn check_unique(
    id_service: web::Data<IdGenerationService>,
    query: web::Query<CardIdQuery>,
) -> Result<HttpResponse, CustomError> {
    let unique = id_service.is_unique(&query.card_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "card_id": query.card_id,
        "unique": unique
    })))
}

pub async fn state_code(
    id_service: web::Data<IdGenerationService>,
    query: web::Query<NameQuery>,
) -> impl Responder {
    let code = id_service.state_code(query.name.as_deref());

    HttpResponse::Ok().json(json!({
        "success": true,
        "code": code
    }))
}

pub async fn country_code(
    id_service: web::Data<IdGenerationService>,
    query: web::Query<NameQuery>,
) -> impl Responder {
    let code = id_service.country_code(query.name.as_deref());

    HttpResponse::Ok().json(json!({
        "success": true,
        "code": code
    }))
}
