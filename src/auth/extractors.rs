use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::warn;
use uuid::Uuid;

use super::claims::{Claims, TokenKind};
use crate::state::AppState;

/// Extracts and validates the bearer JWT, returning the owner id.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, "missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or((StatusCode::UNAUTHORIZED, "invalid auth scheme".into()))?;

        let cfg = &state.config.jwt;
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&cfg.audience));
        validation.set_issuer(std::slice::from_ref(&cfg.issuer));
        let decoding = DecodingKey::from_secret(cfg.secret.as_bytes());

        let data = decode::<Claims>(token, &decoding, &validation).map_err(|e| {
            warn!(error = %e, "rejected token");
            (StatusCode::UNAUTHORIZED, "invalid or expired token".to_string())
        })?;

        if data.claims.kind != TokenKind::Access {
            return Err((StatusCode::UNAUTHORIZED, "access token required".into()));
        }

        Ok(AuthUser(data.claims.sub))
    }
}

#[cfg(test)]
pub(crate) fn sign_for_tests(
    cfg: &crate::config::JwtConfig,
    sub: Uuid,
    kind: TokenKind,
    ttl_secs: i64,
) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::OffsetDateTime;

    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub,
        iat: now as usize,
        exp: (now + ttl_secs) as usize,
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        kind,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(cfg.secret.as_bytes()))
        .expect("sign test token")
}
