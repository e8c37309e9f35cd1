use std::collections::HashSet;

use chrono::Utc;
use log::{info, warn};
use sea_orm::*;
use thiserror::Error;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::candidate::Candidate;
use crate::models::dto::BallotRecord;
use crate::models::votes;
use crate::services::token_service::TokenService;

pub struct BallotService;

/// Raisons de refus d'un bulletin avant toute écriture
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BallotError {
    #[error("Ballot must rank exactly {expected} candidates (got {actual})")]
    WrongSize { expected: usize, actual: usize },
    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),
    #[error("Candidate ranked more than once: {0}")]
    Duplicate(String),
}

impl From<BallotError> for ApiError {
    fn from(err: BallotError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl BallotService {
    /// Un bulletin = exactement `size` identifiants, tous connus, sans doublon
    pub fn validate(ballot: &[String], candidates: &[Candidate], size: usize) -> Result<(), BallotError> {
        if ballot.len() != size {
            return Err(BallotError::WrongSize {
                expected: size,
                actual: ballot.len(),
            });
        }

        let known: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        let mut seen = HashSet::with_capacity(ballot.len());

        for id in ballot {
            if !known.contains(id.as_str()) {
                return Err(BallotError::UnknownCandidate(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(BallotError::Duplicate(id.clone()));
            }
        }

        Ok(())
    }

    /// Enregistre le bulletin et consomme le code dans la même transaction
    /// Deux soumissions concurrentes avec le même code: une seule réussit
    pub async fn submit(
        db: &DatabaseConnection,
        config: &AppConfig,
        code: &str,
        ballot: Vec<String>,
    ) -> Result<votes::Model, ApiError> {
        Self::validate(&ballot, &config.candidates, config.ballot_size)?;

        let serialized = serde_json::to_string(&ballot)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize ballot: {}", e)))?;

        let txn = db.begin().await?;

        // 1. Update conditionnel: used false -> true
        if !TokenService::consume(&txn, code).await? {
            txn.rollback().await?;
            return Err(ApiError::InvalidToken);
        }

        // 2. Insérer le bulletin
        let inserted = votes::ActiveModel {
            token: Set(code.to_owned()),
            ballot: Set(serialized),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        let vote = match inserted {
            Ok(vote) => vote,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                warn!("Ballot already recorded for a token marked unused");
                txn.rollback().await?;
                return Err(ApiError::InvalidToken);
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        info!("Recorded ballot #{}", vote.id);
        Ok(vote)
    }

    /// Tous les bulletins, dans l'ordre de soumission
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<BallotRecord>, ApiError> {
        let votes = votes::Entity::find()
            .order_by_asc(votes::Column::Id)
            .all(db)
            .await?;

        votes.into_iter().map(Self::to_record).collect()
    }

    fn to_record(vote: votes::Model) -> Result<BallotRecord, ApiError> {
        let ballot: Vec<String> = serde_json::from_str(&vote.ballot).map_err(|e| {
            ApiError::Internal(format!("Stored ballot #{} is not valid JSON: {}", vote.id, e))
        })?;

        Ok(BallotRecord {
            id: vote.id,
            token: vote.token,
            ballot,
            created_at: vote.created_at,
        })
    }
}
