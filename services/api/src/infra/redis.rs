use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::ChallengeStore;
use crate::domain::types::Challenge;
use crate::error::ApiError;

/// Challenge store backed by Redis, one JSON value per subject.
///
/// `SET` gives the overwrite-on-reissue semantics for free; single-key
/// commands are atomic, which is all the concurrency model asks of the
/// store. No TTL is set — expiry is decided lazily by the validator so an
/// expired-but-present record can still be reported as expired rather than
/// missing.
#[derive(Clone)]
pub struct RedisChallengeStore {
    pub pool: Pool,
}

fn challenge_key(subject: &str) -> String {
    format!("challenge:{subject}")
}

impl RedisChallengeStore {
    async fn conn(&self) -> Result<deadpool_redis::Connection, ApiError> {
        self.pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))
    }
}

impl ChallengeStore for RedisChallengeStore {
    async fn put(&self, challenge: &Challenge) -> Result<(), ApiError> {
        let mut conn = self.conn().await?;
        let key = challenge_key(&challenge.subject);
        let value = serde_json::to_string(challenge).map_err(|e| ApiError::Internal(e.into()))?;
        let (): () = conn
            .set(&key, value)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }

    async fn get(&self, subject: &str) -> Result<Option<Challenge>, ApiError> {
        let mut conn = self.conn().await?;
        let key = challenge_key(subject);
        let value: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        value
            .map(|v| serde_json::from_str(&v).map_err(|e| ApiError::Internal(e.into())))
            .transpose()
    }

    async fn delete(&self, subject: &str) -> Result<(), ApiError> {
        let mut conn = self.conn().await?;
        let key = challenge_key(subject);
        let (): () = conn
            .del(&key)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }
}
