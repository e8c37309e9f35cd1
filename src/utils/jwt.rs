use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use jsonwebtoken::errors::Error as JwtError;
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,        // admin_id
    pub email: String,
    pub iat: i64,
    pub exp: i64,        // expiration timestamp
}

/// Génère un JWT pour un admin, valide pendant `ttl`
pub fn generate_token(
    secret: &[u8],
    admin_id: i32,
    email: &str,
    ttl: Duration,
) -> Result<String, JwtError> {
    let now = Utc::now();

    let claims = Claims {
        sub: admin_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// Vérifie signature et expiration d'un JWT admin
pub fn verify_token(secret: &[u8], token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0; // pas de tolérance après les 2h

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &validation,
    )
        .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn test_generate_and_verify_token() {
        let token = generate_token(SECRET, 7, "admin@example.org", Duration::hours(2)).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "admin@example.org");
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn test_wrong_secret() {
        let token = generate_token(SECRET, 7, "admin@example.org", Duration::hours(2)).unwrap();
        assert!(verify_token(b"other-secret", &token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token(SECRET, 7, "admin@example.org", Duration::seconds(-5)).unwrap();
        assert!(verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token(SECRET, "invalid.token.here");
        assert!(result.is_err());
    }
}
