use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use jsonwebtoken::errors::Error as JwtError;
use log::error;
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::dto::ErrorResponse;
use crate::utils::password::PasswordError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Erreurs renvoyées par les handlers. Le corps est toujours {"error": "..."}
#[derive(Debug, Error)]
pub enum ApiError {
    /// Champ manquant, corps illisible, bulletin ou count invalide
    #[error("{0}")]
    Validation(String),
    /// Code inconnu OU déjà utilisé: même réponse dans les deux cas
    #[error("Invalid or used token")]
    InvalidToken,
    /// Email inconnu OU mauvais mot de passe
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Header absent, mal formé, signature invalide ou JWT expiré
    #[error("Unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidToken => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Jwt(_) | Self::Password(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                // Le détail reste dans les logs
                error!("{}", self);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error: message })
    }
}
