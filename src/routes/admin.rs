use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthAdmin;
use crate::models::dto::{LoginRequest, LoginResponse};
use crate::services::admin_service::AdminService;
use crate::services::ballot_service::BallotService;
use crate::utils::jwt;

/// POST /api/admin/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let missing = || ApiError::validation("Missing credentials");

    body.validate().map_err(|_| missing())?;
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(missing());
    };

    // 1. Vérifier email + mot de passe
    let admin = AdminService::authenticate(db.get_ref(), &email, &password).await?;

    // 2. Générer le JWT (2h)
    let token = jwt::generate_token(config.jwt_secret(), admin.id, &admin.email, config.credential_ttl)?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// GET /api/admin/votes - Tous les bulletins (PROTÉGÉE)
#[get("/votes")]
pub async fn list_votes(
    _admin: AuthAdmin,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let ballots = BallotService::list(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(ballots))
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(login)
            .service(list_votes)
    );
}
