use hmac::Hmac;
use pbkdf2::pbkdf2;
use pbkdf2::password_hash::Output;
use sha2::Sha256;
use rand::Rng;
use base64::{Engine, engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD}};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const ITERATIONS: u32 = 260000;
const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// Hash leurre au coût de production: vérifié quand l'email est inconnu pour
/// que la réponse prenne le même temps qu'un mauvais mot de passe
pub const DECOY_HASH: &str =
    "pbkdf2:sha256:260000$ktDq7s2ru5NirNIumPt9MQ$8UByNgzzVon60E6qFhHTVXU9Ik-U6kwoiFuD9EBW10Y";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid password hash: {0}")]
    InvalidFormat(&'static str),
    #[error("PBKDF2 failed: {0}")]
    Pbkdf2(String),
}

/// Hash un mot de passe au format Werkzeug: pbkdf2:sha256:iterations$salt$hash
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_iterations(password, ITERATIONS)
}

/// Même format, nombre d'itérations choisi (les tests utilisent un petit nombre)
pub fn hash_password_with_iterations(password: &str, iterations: u32) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    derive(password, &salt, iterations, &mut key)?;

    // base64 URL-safe sans padding (format Werkzeug moderne)
    let salt_b64 = URL_SAFE_NO_PAD.encode(salt);
    let hash_b64 = URL_SAFE_NO_PAD.encode(key);

    Ok(format!("pbkdf2:sha256:{}${}${}", iterations, salt_b64, hash_b64))
}

/// Vérifie un mot de passe contre un hash Werkzeug (salt/hash en base64 ou hex)
/// La comparaison finale est en temps constant
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let mut parts = stored_hash.split('$');
    let (Some(header), Some(salt_str), Some(hash_str), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(PasswordError::InvalidFormat("expected header$salt$hash"));
    };

    let iterations = match header.split(':').collect::<Vec<_>>().as_slice() {
        ["pbkdf2", "sha256", iterations] => iterations
            .parse::<u32>()
            .map_err(|_| PasswordError::InvalidFormat("iterations"))?,
        _ => return Err(PasswordError::InvalidFormat("header")),
    };

    let salt = decode_flexible(salt_str)?;
    let expected_hash = decode_flexible(hash_str)?;

    let mut computed = vec![0u8; expected_hash.len()];
    derive(password, &salt, iterations, &mut computed)?;

    // Output compare en temps constant
    let expected = Output::new(&expected_hash).map_err(|_| PasswordError::InvalidFormat("hash length"))?;
    let computed = Output::new(&computed).map_err(|_| PasswordError::InvalidFormat("hash length"))?;

    Ok(computed == expected)
}

fn derive(password: &str, salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<(), PasswordError> {
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations, out)
        .map_err(|e| PasswordError::Pbkdf2(e.to_string()))
}

/// Décode une chaîne en hex (64 caractères) ou base64, avec ou sans padding
fn decode_flexible(input: &str) -> Result<Vec<u8>, PasswordError> {
    if input.len() == 64 && input.chars().all(|c| c.is_ascii_hexdigit()) {
        return hex::decode(input).map_err(|_| PasswordError::InvalidFormat("hex"));
    }

    let padded = add_base64_padding(input);

    STANDARD.decode(&padded)
        .or_else(|_| URL_SAFE.decode(&padded))
        .or_else(|_| URL_SAFE_NO_PAD.decode(input))
        .or_else(|_| STANDARD_NO_PAD.decode(input))
        .or_else(|_| hex::decode(input))
        .map_err(|_| PasswordError::InvalidFormat("encoding"))
}

fn add_base64_padding(input: &str) -> String {
    let padding_needed = (4 - (input.len() % 4)) % 4;
    format!("{}{}", input, "=".repeat(padding_needed))
}
