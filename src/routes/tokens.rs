use actix_web::{post, web, HttpResponse};
use log::info;
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthAdmin;
use crate::models::dto::{GenerateTokensRequest, GenerateTokensResponse, DEFAULT_TOKEN_COUNT};
use crate::services::token_service::TokenService;

/// POST /api/tokens/generate - Générer un lot de codes de vote (PROTÉGÉE)
/// Corps optionnel: {"count": n}, 10 par défaut
#[post("/generate")]
pub async fn generate_tokens(
    admin: AuthAdmin,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = parse_request(&body)?;
    request
        .validate()
        .map_err(|_| ApiError::validation("count must be a positive integer"))?;

    let count = request.count.unwrap_or(DEFAULT_TOKEN_COUNT);
    if count > config.max_token_batch {
        return Err(ApiError::validation(format!(
            "count must not exceed {}",
            config.max_token_batch
        )));
    }

    let codes = TokenService::generate(db.get_ref(), count).await?;
    info!("Admin {} minted {} tokens", admin.email, codes.len());

    Ok(HttpResponse::Ok().json(GenerateTokensResponse { codes }))
}

fn parse_request(body: &[u8]) -> ApiResult<GenerateTokensRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateTokensRequest::default());
    }

    serde_json::from_slice(body).map_err(|_| ApiError::validation("count must be a positive integer"))
}

pub fn token_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tokens")
            .service(generate_tokens)
    );
}
