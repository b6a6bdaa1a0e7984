//! Baseline security response headers
//!
//! The subset of hardening headers the portal front-end expects from its
//! API. Applied in every environment; HSTS is only meaningful behind TLS
//! and is therefore restricted to production.

use actix_web::middleware::DefaultHeaders;

use ce_shared::config::Environment;

/// Build the security header set for the given environment.
pub fn security_headers(environment: Environment) -> DefaultHeaders {
    let mut headers = DefaultHeaders::new()
        // Prevent MIME type sniffing
        .add(("X-Content-Type-Options", "nosniff"))
        // Prevent clickjacking
        .add(("X-Frame-Options", "DENY"))
        // Control referrer information
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
        // API responses never embed anything
        .add((
            "Content-Security-Policy",
            "default-src 'none'; frame-ancestors 'none';",
        ));

    if !environment.is_development() {
        headers = headers.add((
            "Strict-Transport-Security",
            "max-age=31536000; includeSubDomains",
        ));
    }

    headers
}
