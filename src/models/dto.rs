//pour les requêtes et réponses de l'API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::candidate::Candidate;

/// Nombre de codes générés quand count est absent
pub const DEFAULT_TOKEN_COUNT: u32 = 10;

// POST /api/admin/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// POST /api/tokens/generate (corps optionnel)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenerateTokensRequest {
    #[validate(range(min = 1))]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTokensResponse {
    pub codes: Vec<String>,
}

// POST /api/vote
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct VoteRequest {
    #[validate(required, length(min = 1))]
    pub token: Option<String>,
    #[validate(required)]
    pub ballot: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

// GET /api/vote/check?token=xxx
#[derive(Debug, Deserialize)]
pub struct CheckTokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckTokenResponse {
    pub valid: bool,
}

// GET /api/admin/votes : bulletin désérialisé, ordre des rangs conservé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub id: i32,
    pub token: String,
    pub ballot: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// GET /api/candidates
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub ballot_size: usize,
    pub candidates: Vec<Candidate>,
}

// Corps de toutes les réponses d'erreur
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
