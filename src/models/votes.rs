// ============================================================================
// MODÈLE : VOTES (bulletins soumis)
// ============================================================================
//
// Colonnes de la table votes:
//   - id (INTEGER, PRIMARY KEY, SERIAL)
//   - token (VARCHAR, UNIQUE, NOT NULL, FK vers tokens.code)
//   - ballot (TEXT, NOT NULL) - tableau JSON ordonné d'identifiants de candidats
//   - created_at (TIMESTAMP, NOT NULL)
//
// Points d'attention:
//   - Un seul bulletin par code: contrainte UNIQUE + update conditionnel sur tokens.used
//   - Le bulletin est immuable après insertion
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub token: String,

    #[sea_orm(column_type = "Text")]
    pub ballot: String, // JSON: ["c3", "c1", ...] rang 1 en premier

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tokens::Entity",
        from = "Column::Token",
        to = "super::tokens::Column::Code"
    )]
    Token,
}

impl Related<super::tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Token.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
