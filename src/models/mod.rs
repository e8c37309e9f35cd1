// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Liste des modules:
//   - admins : Comptes administrateurs (email + hash du mot de passe)
//   - tokens : Codes de vote à usage unique
//   - votes : Bulletins soumis (un par code)
//   - candidate : Candidats (données de référence, non persistées)
//   - dto : Requêtes / réponses de l'API
//   - health : Health check API
//
// Points d'attention:
//   - Tous les modèles persistés utilisent SeaORM (pas de SQL brut)
//   - Les tables sont créées au démarrage depuis les entités (db::ensure_schema)
//
// ============================================================================

pub mod admins;
pub mod candidate;
pub mod dto;
pub mod health;
pub mod tokens;
pub mod votes;
