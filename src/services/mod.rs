pub mod admin_service;
pub mod ballot_service;
pub mod token_service;
