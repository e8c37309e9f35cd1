use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::utils::jwt;

/// Admin authentifié par son JWT
/// Utilisé comme extracteur dans les routes protégées
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAdmin {
    pub admin_id: i32,
    pub email: String,
}

/// Toute erreur d'authentification donne le même 401, quelle que soit la cause
impl FromRequest for AuthAdmin {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthAdmin, ApiError> {
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| ApiError::Internal("AppConfig is not registered".to_string()))?;

    // 1. Extraire le header Authorization
    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized)?
        .to_str()
        .map_err(|_| ApiError::Unauthorized)?;

    // 2. Extraire le token (format: "Bearer <token>")
    let token = auth_str
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    // 3. Vérifier signature et expiration
    let claims = jwt::verify_token(config.jwt_secret(), token).map_err(|e| {
        debug!("Rejected admin credential: {}", e);
        ApiError::Unauthorized
    })?;

    Ok(AuthAdmin {
        admin_id: claims.sub,
        email: claims.email,
    })
}
