use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

use crate::error::AppError;

lazy_static! {
    /// Verified against when the username is unknown, so a failed login
    /// costs one argon2 verification either way.
    static ref DUMMY_HASH: Option<String> = hash_password("mytutor-dummy-password").ok();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Hashes on the blocking pool.
pub async fn hash_password_blocking(plain: &str) -> Result<String, AppError> {
    let plain = plain.to_string();
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| AppError::Internal(format!("hash task join error: {e}")))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Verifies on the blocking pool. `hash = None` burns the same work
/// against the dummy hash and always returns `false`.
pub async fn verify_password_blocking(plain: &str, hash: Option<&str>) -> Result<bool, AppError> {
    let plain = plain.to_string();
    let real = hash.map(str::to_string);
    tokio::task::spawn_blocking(move || match real {
        Some(h) => verify_password(&plain, &h),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&plain, dummy);
            }
            Ok(false)
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("verify task join error: {e}")))?
    .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("pw1"));
    }

    #[tokio::test]
    async fn blocking_verify_without_hash_is_false() {
        assert!(!verify_password_blocking("pw1", None).await.unwrap());
    }

    #[tokio::test]
    async fn blocking_roundtrip() {
        let hash = hash_password_blocking("pw1").await.unwrap();
        assert!(verify_password_blocking("pw1", Some(&hash)).await.unwrap());
        assert!(!verify_password_blocking("pw2", Some(&hash)).await.unwrap());
    }
}
