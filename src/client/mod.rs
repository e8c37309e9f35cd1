//! Logique des clients: bulletin en construction, recherche de candidats,
//! notices temporaires, session admin et appels HTTP.

pub mod api;
pub mod draft;
pub mod flash;
pub mod search;
pub mod session;

pub use api::{ApiClient, ClientError};
pub use draft::{BallotDraft, DraftError};
pub use flash::{FlashBoard, FlashKind};
pub use session::{AdminSession, SessionStore};
