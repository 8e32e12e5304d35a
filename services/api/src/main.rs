use sea_orm::Database;
use tracing::info;

use staffdesk_api::config::ApiConfig;
use staffdesk_api::infra::delivery::{DeliveryConfig, HttpDelivery};
use staffdesk_api::router::build_router;
use staffdesk_api::state::AppState;

#[tokio::main]
async fn main() {
    staffdesk_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let delivery = HttpDelivery::new(DeliveryConfig {
        twilio_account_sid: config.twilio_account_sid,
        twilio_auth_token: config.twilio_auth_token,
        twilio_from_number: config.twilio_from_number,
        sendgrid_api_key: config.sendgrid_api_key,
        email_from: config.email_from,
    });

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        dashboard_origin: config.dashboard_origin,
        delivery,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
