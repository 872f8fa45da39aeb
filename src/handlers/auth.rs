use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::{
    jwt::{create_token_pair, verify_token, TokenPair, TokenType},
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::dto::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserProfile};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<TokenPair>> {
    let body = RegisterRequest {
        username: body.username.trim().to_string(),
        email: body.email.trim().to_string(),
        password: body.password.trim().to_string(),
    };
    if body.username.is_empty() || body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation("All fields are required.".into()));
    }
    body.validate()?;
    let (username, email) = (body.username.as_str(), body.email.as_str());

    if state.stores.users.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists.".into()));
    }
    if state.stores.users.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered.".into()));
    }

    let user = User::registered(username, email, hash_password(&body.password)?);
    // A concurrent registration can still win the race; the store reports it as Conflict.
    state.stores.users.create(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(create_token_pair(&user, &state.config)?))
}

pub async fn guest(State(state): State<AppState>) -> AppResult<Json<TokenPair>> {
    let user = User::guest();
    state.stores.users.create(&user).await?;

    tracing::info!(user_id = %user.id, "Guest session started");
    Ok(Json(create_token_pair(&user, &state.config)?))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = state
        .stores
        .users
        .find_by_username(body.username.trim())
        .await?
        .filter(|u| !u.is_guest)
        .ok_or(AppError::Unauthorized)?;

    let password_hash = user.password_hash.as_deref().ok_or(AppError::Unauthorized)?;
    if !verify_password(body.password.trim(), password_hash)? {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(AppError::Unauthorized);
    }

    Ok(Json(create_token_pair(&user, &state.config)?))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let token_data = verify_token(&body.refresh_token, &state.config)?;

    if token_data.claims.token_type != TokenType::Refresh {
        return Err(AppError::Unauthorized);
    }

    // Tokens for removed accounts stop refreshing.
    let user = state
        .stores
        .users
        .find_by_id(token_data.claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(create_token_pair(&user, &state.config)?))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .stores
        .users
        .find_by_id(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
