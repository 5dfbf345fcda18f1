use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginResponse, RegisterResponse},
        password::{hash_password_blocking, verify_password_blocking},
    },
    error::AppError,
    users::UserStore,
};

const MAX_USERNAME_CHARS: usize = 64;

/// Stricter than a bare presence check: whitespace-only usernames and
/// empty passwords are refused with 400 before the store is touched.
pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AppError::Validation(format!(
            "Username must be at most {MAX_USERNAME_CHARS} characters"
        )));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    Ok(())
}

pub async fn register(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<RegisterResponse, AppError> {
    validate_credentials(username, password)?;

    let hash = hash_password_blocking(password).await?;

    // Single round-trip; the store arbitrates uniqueness.
    let Some(user) = store.insert_if_absent(username, &hash).await? else {
        warn!(%username, "username already registered");
        return Err(AppError::Conflict);
    };

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(RegisterResponse {
        message: "User registered successfully",
        username: user.username,
    })
}

pub async fn login(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<LoginResponse, AppError> {
    let user = store.find_by_username(username).await?;

    let ok = verify_password_blocking(password, user.as_ref().map(|u| u.password_hash.as_str()))
        .await?;

    let user = match user {
        Some(u) if ok => u,
        Some(u) => {
            warn!(user_id = u.id, "login invalid password");
            return Err(AppError::Authentication);
        }
        None => {
            warn!(%username, "login unknown username");
            return Err(AppError::Authentication);
        }
    };

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(LoginResponse {
        message: "Login successful",
        username: user.username,
        grade: user.grade,
        subject: user.subject,
        tutor_name: user.tutor_name,
    })
}
