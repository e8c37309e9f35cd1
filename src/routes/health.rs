use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use log::warn;
use sea_orm::DatabaseConnection;

use crate::models::health::HealthResponse;

/// GET /api/health - 200 si la base répond, 503 sinon
#[get("/health")]
pub async fn health_check(db: web::Data<DatabaseConnection>) -> HttpResponse {
    let (status, mut response) = match db.ping().await {
        Ok(()) => ("ok", HttpResponse::Ok()),
        Err(e) => {
            warn!("Health check failed: {}", e);
            ("degraded", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        time: Utc::now(),
    })
}
