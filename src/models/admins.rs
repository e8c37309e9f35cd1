// ============================================================================
// MODÈLE : ADMINS
// ============================================================================
//
// Colonnes de la table admins:
//   - id (INTEGER, PRIMARY KEY, SERIAL)
//   - email (VARCHAR, UNIQUE, NOT NULL)
//   - password_hash (VARCHAR, NOT NULL) - format pbkdf2:sha256:iterations$salt$hash
//
// Points d'attention:
//   - Les comptes sont créés hors API (seed au démarrage via ADMIN_EMAIL / ADMIN_PASSWORD)
//   - Le mot de passe n'est jamais stocké en clair ni renvoyé en JSON
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
