use crate::domain::models::operator::{Claims, Operator};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tracing::Span;

/// Verified operator identity. Token issuance lives in a separate
/// service; we only check the signature and unpack the capability set.
pub struct AuthOperator(pub Operator);

impl<S> FromRequestParts<S> for AuthOperator
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let decoding_key = DecodingKey::from_secret(app_state.config.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        let operator = Operator {
            id: token_data.claims.sub,
            permissions: token_data.claims.perms.into_iter().collect(),
        };

        Span::current().record("operator_id", operator.id.as_str());

        Ok(AuthOperator(operator))
    }
}
