use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use terminus_core::context::{Role, UserContext};

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims issued by the identity service sharing our signing secret.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

/// Decode the bearer token once and inject an explicit [`UserContext`]
/// that handlers receive as a parameter. Anonymous callers stop here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let claims = token_data.claims;
    req.extensions_mut()
        .insert(UserContext::new(claims.sub, claims.role));

    Ok(next.run(req).await)
}

/// Reference data is read-only for regular users; mutation requires the
/// admin role.
pub fn require_admin(ctx: &UserContext) -> Result<(), ApiError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("admin role required".to_string()))
    }
}
