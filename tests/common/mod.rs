#![allow(dead_code)]

use std::path::PathBuf;

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

use rcv_ballot::config::AppConfig;
use rcv_ballot::db;
use rcv_ballot::models::admins;
use rcv_ballot::utils::password;

pub const ADMIN_EMAIL: &str = "admin@example.org";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Base SQLite en mémoire: une seule connexion, sinon chaque connexion du pool
/// verrait sa propre base vide
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    db::ensure_schema(&db).await.unwrap();
    db
}

/// Base SQLite sur disque avec deux connexions, pour que deux transactions
/// puissent réellement se croiser. Fichiers supprimés au drop.
pub struct FileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}

pub async fn file_db() -> FileDb {
    let path = std::env::temp_dir().join(format!("rcv-ballot-{}.db", Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options
        .max_connections(2)
        .min_connections(2)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    db::ensure_schema(&db).await.unwrap();
    FileDb { db, path }
}

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "MAX_TOKEN_BATCH" => Some("100".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Compte admin avec peu d'itérations PBKDF2 pour garder les tests rapides
pub async fn seed_admin(db: &DatabaseConnection) -> admins::Model {
    admins::ActiveModel {
        email: Set(ADMIN_EMAIL.to_string()),
        password_hash: Set(password::hash_password_with_iterations(ADMIN_PASSWORD, 1_000).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Bulletin complet de 14 candidats connus, rang 1 = c14
pub fn full_ballot() -> Vec<String> {
    (1..=14).rev().map(|n| format!("c{}", n)).collect()
}

/// Application complète (routes + état partagé) prête pour `test::call_service`
#[macro_export]
macro_rules! test_app {
    ($db:expr, $config:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new($config.clone()))
                .configure(rcv_ballot::routes::configure_routes),
        )
        .await
    };
}
