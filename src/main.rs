use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;

mod database;
mod idgen;
mod middleware;
mod otp;
mod router;
mod utils;

use idgen::repository::{MongoFormatRegistry, MongoRecordStore};
use idgen::service::IdGenerationService;
use middleware::not_found::not_found;
use otp::service::OtpService;
use router::index::routes;
use utils::email::{EmailService, LogNotifier, Notifier};

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the Farm Registry service",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string()),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger with environment variable support
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .expect("PORT must be a valid number");

    info!("Starting server on http://{}:{}", host, port);

    let mongo_client = database::connect_to_mongo()
        .await
        .expect("Failed to connect to MongoDB");

    let notifier: Arc<dyn Notifier> = match EmailService::new() {
        Ok(email_service) => Arc::new(email_service),
        Err(e) => {
            warn!("SMTP not configured ({}); OTP codes will only be logged", e);
            Arc::new(LogNotifier)
        }
    };

    let otp_service = web::Data::new(OtpService::new(notifier));
    let id_service = web::Data::new(IdGenerationService::new(
        Arc::new(MongoFormatRegistry::new(&mongo_client)),
        Arc::new(MongoRecordStore::new(&mongo_client)),
    ));

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(otp_service.clone())
            .app_data(id_service.clone())
            .configure(routes)
            .wrap(ErrorHandlers::new().handler(StatusCode::NOT_FOUND, not_found))
            .service(default)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
