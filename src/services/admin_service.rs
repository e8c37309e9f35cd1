use log::{error, info};
use sea_orm::*;

use crate::error::ApiError;
use crate::models::admins;
use crate::utils::password;

pub struct AdminService;

impl AdminService {
    /// Vérifie email + mot de passe
    /// Email inconnu, mauvais mot de passe et hash illisible donnent la même
    /// erreur, et chacun paie un calcul PBKDF2 complet
    pub async fn authenticate(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<admins::Model, ApiError> {
        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(db)
            .await?;

        let stored_hash = admin
            .as_ref()
            .map_or(password::DECOY_HASH, |a| a.password_hash.as_str());

        let matches = match password::verify_password(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                error!("Unreadable password hash for admin {}: {}", email, e);
                let _ = password::verify_password(password, password::DECOY_HASH);
                false
            }
        };

        match admin {
            Some(admin) if matches => Ok(admin),
            _ => Err(ApiError::InvalidCredentials),
        }
    }

    /// Crée le compte s'il n'existe pas encore. Retourne true si créé.
    pub async fn ensure_admin(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<bool, ApiError> {
        let existing = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(db)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        let password_hash = password::hash_password(password)?;
        admins::ActiveModel {
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Seeded admin account {}", email);
        Ok(true)
    }
}
