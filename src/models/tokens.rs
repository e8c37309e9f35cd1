// ============================================================================
// MODÈLE : TOKENS (codes de vote à usage unique)
// ============================================================================
//
// Colonnes de la table tokens:
//   - code (VARCHAR, PRIMARY KEY) - UUID v4
//   - used (BOOLEAN, NOT NULL) - false à la création
//   - created_at (TIMESTAMP, NOT NULL)
//
// Workflow:
//   1. Admin génère un lot de codes via POST /api/tokens/generate
//   2. Les codes sont distribués à la main (liens d'invitation)
//   3. Le votant vérifie son code via GET /api/vote/check?token=xxx
//   4. POST /api/vote passe used à true dans la même transaction que le bulletin
//
// Points d'attention:
//   - used = true ne revient jamais à false
//   - Les codes ne sont jamais supprimés
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    pub used: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::votes::Entity")]
    Vote,
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
