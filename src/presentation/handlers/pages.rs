use actix_web::{HttpResponse, Responder, get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

#[get("/about")]
pub async fn about() -> impl Responder {
    HttpResponse::Ok().json(json!({ "page": "about" }))
}

#[get("/contact")]
pub async fn contact() -> impl Responder {
    HttpResponse::Ok().json(json!({ "page": "contact" }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
