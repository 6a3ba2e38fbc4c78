use axum::{extract::FromRequestParts, http::header};

use crate::{
    error::AppError,
    services::auth_service::decode_token,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub is_admin: bool,
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Pulls the raw token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Result<&str, AppError> {
    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header".into()))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Token missing".into()));
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Token missing".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = bearer_token(auth_str)?;
        let claims = decode_token(&state.config.jwt_secret, token)?;

        let user_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

        Ok(AuthUser {
            user_id,
            is_admin: claims.admin,
        })
    }
}
