//! Service de vote par classement: codes de vote à usage unique, bulletins
//! ordonnés, console d'administration.
//!
//! Le serveur (`rcv-ballot`) expose l'API REST sous `/api`; le module
//! [`client`] contient la logique des clients de vote et d'administration,
//! utilisée par la console `rcv-console`.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
