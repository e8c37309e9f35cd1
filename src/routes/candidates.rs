use actix_web::{get, web, HttpResponse};

use crate::config::AppConfig;
use crate::models::dto::CandidatesResponse;

/// GET /api/candidates - Données de référence pour les clients (PUBLIC)
#[get("/candidates")]
pub async fn list_candidates(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok().json(CandidatesResponse {
        ballot_size: config.ballot_size,
        candidates: config.candidates.clone(),
    })
}
