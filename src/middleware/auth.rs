use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "session_id";

/// The authenticated caller, resolved from the session cookie against
/// the `sessions` table on every request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_admin: bool,
    pub session_id: Uuid,
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// An [`AuthUser`] that passed the admin check. Extracting it rejects
/// non-admins with 403 before the request body is touched.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&user)?;
        Ok(AdminUser(user))
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    is_admin: bool,
    expires_at: DateTime<Utc>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized("Authentication required".into()))?;

        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

        let session_id = Uuid::parse_str(cookie.value())
            .map_err(|_| AppError::Unauthorized("Invalid session".into()))?;

        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT s.id AS session_id, s.user_id, u.is_admin, s.expires_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&state.pool)
        .await?;

        let row = match row {
            Some(r) => r,
            None => return Err(AppError::Unauthorized("Invalid session".into())),
        };

        if row.expires_at < Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE id = $1")
                .bind(row.session_id)
                .execute(&state.pool)
                .await?;
            return Err(AppError::Unauthorized("Session expired".into()));
        }

        Ok(AuthUser {
            user_id: row.user_id,
            is_admin: row.is_admin,
            session_id: row.session_id,
        })
    }
}
