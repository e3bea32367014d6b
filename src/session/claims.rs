use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Reports whether a stored bearer token carries an `exp` claim in the past.
///
/// The signature is not checked: the client cannot know the server secret,
/// it only wants to avoid replaying a token the server will refuse anyway.
/// Opaque (non-JWT) tokens are never considered expired.
pub fn is_expired(token: &str) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation.leeway = 0;

    match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(_) => false,
        Err(e) => matches!(e.kind(), ErrorKind::ExpiredSignature),
    }
}
