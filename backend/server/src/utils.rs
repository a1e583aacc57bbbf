use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::{
    baas::User,
    error::AppError::{self, Forbidden, MalformedPayload, Unauthorized},
    state::State,
};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Cheap sanity check, the auth provider does the real validation.
pub fn validate_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_ascii_lowercase();

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(MalformedPayload("invalid email address".to_string())),
    }
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(MalformedPayload(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    Ok(())
}

/// Any signed-in user.
pub struct SignedIn(pub User);

/// Signed-in user with the admin role.
pub struct Admin(pub User);

impl FromRequestParts<Arc<State>> for SignedIn {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<State>) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers).ok_or(Unauthorized)?;
        let user = state
            .baas
            .user_for_token(token)
            .await
            .map_err(AppError::from_auth)?;

        Ok(SignedIn(user))
    }
}

impl FromRequestParts<Arc<State>> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<State>) -> Result<Self, AppError> {
        let SignedIn(user) = SignedIn::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(Forbidden);
        }

        Ok(Admin(user))
    }
}
