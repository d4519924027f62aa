use actix_web::dev::ServiceRequest;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{web, Error, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{decode, errors::Error as JwtError, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::{MESSAGE_INTERNAL_SERVER_ERROR, MESSAGE_INVALID_TOKEN};

/// Identity of the caller, as issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub exp: usize, // expiry as timestamp
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Bearer middleware hook: on success the decoded [`Claims`] are reachable
/// from handlers through `web::ReqData<Claims>`.
pub async fn validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let secret = match req.app_data::<web::Data<Config>>() {
        Some(config) => config.jwt_secret.clone(),
        None => {
            log::error!("Config missing from app data, cannot verify tokens");
            return Err((ErrorInternalServerError(MESSAGE_INTERNAL_SERVER_ERROR), req));
        }
    };

    match verify_jwt(credentials.token(), &secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(e) => {
            log::warn!("Rejected bearer token: {}", e);
            Err((ErrorUnauthorized(MESSAGE_INVALID_TOKEN), req))
        }
    }
}

#[cfg(test)]
pub fn create_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: usize) -> Claims {
        Claims {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            exp,
        }
    }

    #[test]
    fn test_verify_roundtrip() {
        let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
        let token = create_jwt(&claims(exp), "secret").unwrap();

        let decoded = verify_jwt(&token, "secret").unwrap();
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.username, "alice");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
        let token = create_jwt(&claims(exp), "secret").unwrap();

        assert!(verify_jwt(&token, "other").is_err());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let exp = (chrono::Utc::now().timestamp() - 3600) as usize;
        let token = create_jwt(&claims(exp), "secret").unwrap();

        assert!(verify_jwt(&token, "secret").is_err());
    }
}
