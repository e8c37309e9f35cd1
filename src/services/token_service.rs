use chrono::Utc;
use log::info;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::tokens;

/// Lignes par INSERT (3 paramètres liés par ligne)
const INSERT_CHUNK: usize = 500;

pub struct TokenService;

impl TokenService {
    /// Crée `count` nouveaux codes (UUID v4) dans une seule transaction
    pub async fn generate(db: &DatabaseConnection, count: u32) -> Result<Vec<String>, DbErr> {
        let codes: Vec<String> = (0..count).map(|_| Uuid::new_v4().to_string()).collect();
        if codes.is_empty() {
            return Ok(codes);
        }

        let now = Utc::now();
        let txn = db.begin().await?;
        for chunk in codes.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|code| tokens::ActiveModel {
                code: Set(code.clone()),
                used: Set(false),
                created_at: Set(now),
            });
            tokens::Entity::insert_many(models)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;

        info!("Generated {} voting tokens", codes.len());
        Ok(codes)
    }

    /// Vrai si le code existe et n'a pas encore servi. Aucune écriture.
    pub async fn is_valid<C: ConnectionTrait>(db: &C, code: &str) -> Result<bool, DbErr> {
        let token = tokens::Entity::find_by_id(code.to_owned()).one(db).await?;
        Ok(token.is_some_and(|t| !t.used))
    }

    /// Passe used à true seulement s'il était à false
    /// Retourne false si le code est inconnu ou déjà consommé
    pub async fn consume<C: ConnectionTrait>(db: &C, code: &str) -> Result<bool, DbErr> {
        let result = tokens::Entity::update_many()
            .col_expr(tokens::Column::Used, Expr::value(true))
            .filter(tokens::Column::Code.eq(code))
            .filter(tokens::Column::Used.eq(false))
            .exec(db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
