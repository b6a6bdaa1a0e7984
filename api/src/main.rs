use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use ce_core::repositories::otp::InMemoryOtpStore;
use ce_core::services::otp::{OtpService, OtpSweeper, SweeperConfig};
use ce_infra::create_sms_channel;

mod app;
mod config;
mod dto;
mod middleware;
mod routes;

use app::create_app;
use config::ApiConfig;
use middleware::rate_limit::RateLimiter;
use routes::otp::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Campus Eats OTP API Server");

    let config = ApiConfig::from_env();
    let bind_address = config.app.server.bind_address();
    info!("Environment: {}", config.app.environment.as_str());
    info!("Server will bind to: {}", bind_address);

    // Wire the subject store, delivery channel and OTP service
    let store = Arc::new(InMemoryOtpStore::new());
    let sms_channel = create_sms_channel(&config.sms_provider, &config.app.otp);
    info!("SMS provider: {}", config.sms_provider);

    let otp_service = Arc::new(OtpService::new(
        Arc::new(sms_channel),
        store,
        (&config.app.otp).into(),
    ));

    // Background expiry sweep, stopped again after the server exits
    let sweeper_handle = OtpSweeper::new(
        otp_service.clone(),
        SweeperConfig {
            interval_seconds: config.app.otp.sweep_interval_seconds,
            enabled: true,
        },
    )
    .start();

    // Shared rate limiter state across all workers
    let general_limiter = RateLimiter::general(&config.app.rate_limit);
    let otp_send_limiter = RateLimiter::otp_send(&config.app.rate_limit);

    let app_state = web::Data::new(AppState { otp_service });
    let environment = config.app.environment;

    let server = HttpServer::new(move || {
        create_app(
            app_state.clone(),
            environment,
            general_limiter.clone(),
            otp_send_limiter.clone(),
        )
    })
    .bind(&bind_address)?
    .run();

    info!("OTP service ready for SMS delivery");

    let result = server.await;
    sweeper_handle.stop().await;
    result
}
