use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    entity::{Sessions, sessions},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserProfile,
    response::MessageResponse,
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<MessageResponse> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload;

    let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&state.pool)
        .await?;
    if exists.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password_hash = hash_password(&password)?;
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(password_hash)
        .execute(&state.pool)
        .await?;

    tracing::info!(user_id = %id, "user registered");
    Ok(MessageResponse::new("Registration successful"))
}

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    id: Uuid,
    username: String,
    password_hash: String,
    is_admin: bool,
}

/// Verify credentials and open a session. The returned session row's id
/// becomes the cookie value.
pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<(sessions::Model, LoginResponse)> {
    let LoginRequest { email, password } = payload;

    let user: Option<UserAuthRow> =
        sqlx::query_as("SELECT id, username, password_hash, is_admin FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&state.pool)
            .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if !verify_password(&user.password_hash, &password)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let expires_at = Utc::now()
        .checked_add_signed(Duration::hours(state.session_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set session expiry")))?;

    let session = sessions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        created_at: NotSet,
        expires_at: Set(expires_at.into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = %user.id, session_id = %session.id, "session created");

    let resp = LoginResponse {
        message: "Login successful".to_string(),
        user: UserProfile {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
        },
    };
    Ok((session, resp))
}

pub async fn logout_user(state: &AppState, user: &AuthUser) -> AppResult<MessageResponse> {
    Sessions::delete_by_id(user.session_id)
        .exec(&state.orm)
        .await?;

    tracing::info!(user_id = %user.user_id, session_id = %user.session_id, "session destroyed");
    Ok(MessageResponse::new("Logout successful"))
}
