//! Bearer-token identity.
//!
//! Tokens are issued by the auth service and signed with a shared HS256
//! secret. Handlers take an [`Actor`] argument to require a valid token.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::identity::{Actor, Role};
use crate::errors::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub role: Role,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Signs a token for `actor` that expires after `ttl`.
    pub fn issue(&self, actor: Actor, ttl: Duration) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            id: actor.id,
            username: None,
            role: actor.role,
            exp: (Utc::now() + ttl).timestamp().max(0) as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Actor, AppError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                log::debug!("Rejected bearer token: {}", e);
                AppError::Unauthenticated
            })?
            .claims;
        Ok(Actor::new(claims.id, claims.role))
    }
}

fn actor_from_request(req: &HttpRequest) -> Result<Actor, AppError> {
    let keys = req
        .app_data::<web::Data<JwtKeys>>()
        .ok_or_else(|| AppError::Internal("JWT keys are not configured".to_string()))?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    keys.verify(token)
}

impl FromRequest for Actor {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(actor_from_request(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn keys() -> web::Data<JwtKeys> {
        web::Data::new(JwtKeys::from_secret(b"test-secret"))
    }

    fn extract(req: TestRequest) -> Result<Actor, AppError> {
        let req = req.to_http_request();
        actor_from_request(&req)
    }

    #[test]
    fn valid_token_yields_actor() {
        let keys = keys();
        let token = keys
            .issue(Actor::new(5, Role::Admin), Duration::minutes(5))
            .unwrap();

        let actor = extract(
            TestRequest::default()
                .app_data(keys)
                .insert_header((AUTHORIZATION, format!("Bearer {}", token))),
        )
        .unwrap();

        assert_eq!(actor, Actor::new(5, Role::Admin));
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let err = extract(TestRequest::default().app_data(keys())).unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = JwtKeys::from_secret(b"other-secret")
            .issue(Actor::new(5, Role::Admin), Duration::minutes(5))
            .unwrap();

        let err = extract(
            TestRequest::default()
                .app_data(keys())
                .insert_header((AUTHORIZATION, format!("Bearer {}", token))),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let token = keys
            .issue(Actor::new(5, Role::User), Duration::hours(-2))
            .unwrap();

        assert!(matches!(keys.verify(&token), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let err = extract(
            TestRequest::default()
                .app_data(keys())
                .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz")),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn unknown_role_claim_is_rejected() {
        #[derive(Serialize)]
        struct RawClaims {
            id: i32,
            role: &'static str,
            exp: usize,
        }
        let raw = RawClaims {
            id: 1,
            role: "superuser",
            exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &raw,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(keys().verify(&token), Err(AppError::Unauthenticated)));
    }
}
