use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::db::DbEmployeeRepository;
use crate::infra::delivery::HttpDelivery;
use crate::infra::redis::RedisChallengeStore;

/// Shared application state passed to every handler via axum `State`.
///
/// `jwt_secret` is injected here once and flows into both token issuance and
/// verification — it is configuration, not a process-wide constant.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub dashboard_origin: String,
    pub delivery: HttpDelivery,
}

impl AppState {
    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn challenge_store(&self) -> RedisChallengeStore {
        RedisChallengeStore {
            pool: self.redis.clone(),
        }
    }

    pub fn delivery(&self) -> HttpDelivery {
        self.delivery.clone()
    }
}
