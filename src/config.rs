// ============================================================================
// CONFIGURATION
// ============================================================================
//
// Variables d'environnement (chargées depuis .env par dotenv):
//   - JWT_SECRET (obligatoire) : clé de signature des JWT admin
//   - DATABASE_URL (obligatoire) : postgres://... ou sqlite::memory:
//   - HOST / PORT : adresse d'écoute (127.0.0.1:4000 par défaut)
//   - BALLOT_SIZE : nombre exact de candidats par bulletin (14)
//   - MAX_TOKEN_BATCH : nombre maximal de codes par génération (1000, plafond 10000)
//   - CANDIDATES_FILE : fichier JSON [{id, name, party, tagline}, ...]
//   - ADMIN_EMAIL / ADMIN_PASSWORD : compte admin créé au démarrage s'il n'existe pas
//
// Points d'attention:
//   - Sans JWT_SECRET le serveur refuse de démarrer (aucune clé par défaut)
//
// ============================================================================

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use crate::models::candidate::{Candidate, sample_candidates};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BALLOT_SIZE: usize = 14;
pub const DEFAULT_MAX_TOKEN_BATCH: u32 = 1000;
/// Plafond accepté pour MAX_TOKEN_BATCH
pub const TOKEN_BATCH_CEILING: u32 = 10_000;
pub const SAMPLE_CANDIDATE_COUNT: usize = 50;

/// Durée de validité d'un JWT admin
pub const CREDENTIAL_TTL_HOURS: i64 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("failed to read {path}: {source}")]
    CandidatesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    CandidatesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid candidate list: {0}")]
    Candidates(String),
}

/// Compte admin à créer au démarrage
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    jwt_secret: String,
    pub credential_ttl: Duration,
    pub ballot_size: usize,
    pub max_token_batch: u32,
    pub candidates: Vec<Candidate>,
    pub admin_seed: Option<AdminSeed>,
}

impl AppConfig {
    /// Lit la configuration depuis l'environnement du process
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lit la configuration depuis une source clé/valeur quelconque
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let ballot_size = parse_or("BALLOT_SIZE", get("BALLOT_SIZE"), DEFAULT_BALLOT_SIZE)?;
        let max_token_batch =
            parse_or("MAX_TOKEN_BATCH", get("MAX_TOKEN_BATCH"), DEFAULT_MAX_TOKEN_BATCH)?;

        if ballot_size == 0 {
            return Err(ConfigError::Invalid {
                name: "BALLOT_SIZE",
                value: ballot_size.to_string(),
            });
        }
        if max_token_batch == 0 || max_token_batch > TOKEN_BATCH_CEILING {
            return Err(ConfigError::Invalid {
                name: "MAX_TOKEN_BATCH",
                value: max_token_batch.to_string(),
            });
        }

        let candidates = match get("CANDIDATES_FILE") {
            Some(path) => load_candidates(PathBuf::from(path))?,
            None => sample_candidates(SAMPLE_CANDIDATE_COUNT),
        };
        check_candidates(&candidates, ballot_size)?;

        let admin_seed = match (get("ADMIN_EMAIL"), get("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_EMAIL")),
        };

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            credential_ttl: Duration::hours(CREDENTIAL_TTL_HOURS),
            ballot_size,
            max_token_batch,
            candidates,
            admin_seed,
        })
    }

    /// Clé de signature des JWT admin
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

// Le secret et le mot de passe admin ne doivent jamais apparaître dans les logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("credential_ttl", &self.credential_ttl)
            .field("ballot_size", &self.ballot_size)
            .field("max_token_batch", &self.max_token_batch)
            .field("candidates", &self.candidates.len())
            .field("admin_seed", &self.admin_seed.as_ref().map(|s| s.email.as_str()))
            .finish_non_exhaustive()
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn load_candidates(path: PathBuf) -> Result<Vec<Candidate>, ConfigError> {
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(source) => return Err(ConfigError::CandidatesIo { path, source }),
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::CandidatesParse { path, source })
}

fn check_candidates(candidates: &[Candidate], ballot_size: usize) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for candidate in candidates {
        if candidate.id.is_empty() {
            return Err(ConfigError::Candidates("empty candidate id".to_string()));
        }
        if !seen.insert(candidate.id.as_str()) {
            return Err(ConfigError::Candidates(format!(
                "duplicate candidate id {}",
                candidate.id
            )));
        }
    }

    if candidates.len() < ballot_size {
        return Err(ConfigError::Candidates(format!(
            "{} candidates cannot fill a ballot of {}",
            candidates.len(),
            ballot_size
        )));
    }

    Ok(())
}
