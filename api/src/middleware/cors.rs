//! CORS middleware configuration for the portal front-end.
//!
//! In development the browser app runs on a Vite dev server, so the
//! local dev origins are allowed with credentials. In production the
//! allowed origins come from the `ALLOWED_ORIGINS` environment variable.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ce_shared::config::Environment;

/// Creates a CORS middleware instance for the given environment.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
pub fn create_cors(environment: Environment) -> Cors {
    if environment.is_development() {
        create_development_cors()
    } else {
        create_production_cors()
    }
}

/// Development CORS: the Vite dev server and common local ports.
fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allowed_origin("http://localhost:5173")
        .allowed_origin("http://localhost:3000")
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// Production CORS: only origins listed in `ALLOWED_ORIGINS`.
fn create_production_cors() -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600);

    if let Ok(allowed_origins) = std::env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}
