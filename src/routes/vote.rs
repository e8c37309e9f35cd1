use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::dto::{CheckTokenQuery, CheckTokenResponse, OkResponse, VoteRequest};
use crate::services::ballot_service::BallotService;
use crate::services::token_service::TokenService;

/// POST /api/vote - Soumettre un bulletin (PUBLIC, code à usage unique)
#[post("")]
pub async fn submit_vote(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Json<VoteRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let missing = || ApiError::validation("Missing token or ballot");

    body.validate().map_err(|_| missing())?;
    let (Some(token), Some(ballot)) = (body.token, body.ballot) else {
        return Err(missing());
    };

    BallotService::submit(db.get_ref(), config.get_ref(), &token, ballot).await?;

    Ok(HttpResponse::Ok().json(OkResponse { ok: true }))
}

/// GET /api/vote/check?token=xxx - Le code peut-il encore voter ? (PUBLIC)
#[get("/check")]
pub async fn check_token(
    db: web::Data<DatabaseConnection>,
    query: web::Query<CheckTokenQuery>,
) -> ApiResult<HttpResponse> {
    let token = query
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::validation("Missing token"))?;

    let valid = TokenService::is_valid(db.get_ref(), token).await?;

    Ok(HttpResponse::Ok().json(CheckTokenResponse { valid }))
}

pub fn vote_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vote")
            .service(check_token)
            .service(submit_vote)
    );
}
