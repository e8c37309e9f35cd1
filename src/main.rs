use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use thiserror::Error;

use rcv_ballot::config::{AppConfig, ConfigError};
use rcv_ballot::error::ApiError;
use rcv_ballot::services::admin_service::AdminService;
use rcv_ballot::{db, routes};

/// Erreurs fatales au démarrage
#[derive(Debug, Error)]
enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to connect to database: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Failed to seed admin account: {0}")]
    Seed(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    info!("Connecting to database...");
    let db = db::establish_connection(&config.database_url).await?;
    db::ensure_schema(&db).await?;
    info!("Database connected");

    if let Some(seed) = &config.admin_seed {
        AdminService::ensure_admin(&db, &seed.email, &seed.password).await?;
    }

    let bind = (config.host.clone(), config.port);
    info!("Starting server on http://{}:{}", bind.0, bind.1);

    let db = web::Data::new(db);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(config.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        error!("{}", err);
        error!("Critical failure, shutting down");
        std::process::exit(1);
    }
}
