use tokio::task;
use tracing::error;

use crate::error::AppError;

/// bcrypt work factor. Matches the cost the stored digests were created
/// with; raising it only affects newly registered users.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password with bcrypt.
///
/// bcrypt is deliberately slow, so the work runs on the blocking pool
/// rather than stalling the request executor.
pub async fn hash(plaintext: String) -> Result<String, AppError> {
    task::spawn_blocking(move || bcrypt::hash(plaintext, HASH_COST))
        .await
        .map_err(|err| AppError::Hash(err.to_string()))?
        .map_err(|err| AppError::Hash(err.to_string()))
}

/// Verify a plaintext password against a stored bcrypt digest.
///
/// bcrypt performs the comparison in constant time. A malformed digest is
/// reported and treated as a mismatch rather than an error, so a corrupt
/// row can never log a user in.
pub async fn verify(plaintext: String, digest: String) -> Result<bool, AppError> {
    let outcome = task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
        .await
        .map_err(|err| AppError::Hash(err.to_string()))?;

    match outcome {
        Ok(valid) => Ok(valid),
        Err(err) => {
            error!("stored password digest rejected by bcrypt: {err}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let digest = hash("correct horse battery staple".to_string())
            .await
            .unwrap();
        assert!(
            verify("correct horse battery staple".to_string(), digest.clone())
                .await
                .unwrap()
        );
        assert!(!verify("wrong password".to_string(), digest).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_digest_verifies_false_without_panicking() {
        let valid = verify("anything".to_string(), "not-a-bcrypt-digest".to_string())
            .await
            .unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn digests_are_salted() {
        let first = hash("same password".to_string()).await.unwrap();
        let second = hash("same password".to_string()).await.unwrap();
        assert_ne!(first, second);
    }
}
