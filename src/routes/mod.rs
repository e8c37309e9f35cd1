pub mod admin;
pub mod candidates;
pub mod health;
pub mod tokens;
pub mod vote;

use actix_web::{error, web};
use log::debug;

use crate::error::ApiError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                .service(health::health_check)
                .service(candidates::list_candidates)
                .configure(vote::vote_routes)
                .configure(admin::admin_routes)
                .configure(tokens::token_routes)
        );
}

/// Corps JSON illisible => 400 {"error": ...} au lieu de la réponse texte d'actix
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("Rejected JSON body: {}", err);
        error::Error::from(ApiError::validation("Malformed request body"))
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!("Rejected query string: {}", err);
        error::Error::from(ApiError::validation("Malformed query string"))
    })
}
