//! Application factory
//!
//! Builds the actix-web application with all middleware and routes. The
//! rate limiters are created once at startup and cloned into every
//! worker's app so their counters are shared process-wide.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use ce_core::repositories::otp::OtpStore;
use ce_core::services::otp::SmsChannel;
use ce_shared::config::Environment;
use ce_shared::errors::ErrorResponse;

use crate::middleware::{cors::create_cors, rate_limit::RateLimiter, security::security_headers};
use crate::routes::health::health_check;
use crate::routes::otp::{send_otp, verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, R>(
    app_state: web::Data<AppState<S, R>>,
    environment: Environment,
    general_limiter: RateLimiter,
    otp_send_limiter: RateLimiter,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: SmsChannel + 'static,
    R: OtpStore + 'static,
{
    let cors = create_cors(environment);

    App::new()
        .app_data(app_state)
        .app_data(json_config(environment))
        // Last-registered middleware runs first: limiter, then CORS, then
        // headers and logging on the way out
        .wrap(Logger::default())
        .wrap(security_headers(environment))
        .wrap(cors)
        .wrap(general_limiter)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // OTP routes; the send endpoint carries its stricter limiter
        .service(
            web::scope("/otp")
                .service(
                    web::resource("/send")
                        .wrap(otp_send_limiter)
                        .route(web::post().to(send_otp::<S, R>)),
                )
                .route("/verify", web::post().to(verify_otp::<S, R>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// JSON extractor configuration: unparsable bodies become the portal's
/// generic error envelope, with detail exposed only in development.
fn json_config(environment: Environment) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, _req| {
        let message = if environment.is_development() {
            err.to_string()
        } else {
            "Internal server error".to_string()
        };
        let response = HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Something went wrong!").with_message(message));
        InternalError::from_response(err, response).into()
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Route not found"))
}
