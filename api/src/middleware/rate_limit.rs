//! Rate limiting middleware for API endpoints
//!
//! Fixed-window per-IP limiting to damp abuse of the OTP endpoints. State
//! lives in a process-local map - the same scope as the subject store -
//! with one instance guarding `/otp/send` and a wider one covering every
//! route. Both instances are created once at startup and cloned into each
//! worker's app, so the counters are shared.

use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;

use ce_shared::config::RateLimitConfig;

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<LimiterState>,
}

struct LimiterState {
    scope: &'static str,
    limit: u32,
    window: Duration,
    enabled: bool,
    error_body: serde_json::Value,
    hits: Mutex<HashMap<String, WindowSlot>>,
}

struct WindowSlot {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    /// Limiter covering every route: 100 requests per IP per window.
    pub fn general(config: &RateLimitConfig) -> Self {
        Self::new(
            "general",
            config.max_requests,
            Duration::from_secs(config.window_seconds),
            config.enabled,
            json!({
                "error": "Too many requests from this IP, please try again later."
            }),
        )
    }

    /// Stricter limiter for the OTP send endpoint: 5 requests per window.
    pub fn otp_send(config: &RateLimitConfig) -> Self {
        Self::new(
            "otp_send",
            config.max_otp_requests,
            Duration::from_secs(config.window_seconds),
            config.enabled,
            json!({
                "error": "Too many OTP requests. Please try again later.",
                "retryAfter": format!("{} minutes", config.window_seconds / 60),
            }),
        )
    }

    fn new(
        scope: &'static str,
        limit: u32,
        window: Duration,
        enabled: bool,
        error_body: serde_json::Value,
    ) -> Self {
        Self {
            inner: Arc::new(LimiterState {
                scope,
                limit,
                window,
                enabled,
                error_body,
                hits: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Count a hit for `ip`; `Err` carries the 429 body when over limit.
    fn check(&self, ip: &str) -> Result<(), serde_json::Value> {
        let state = &*self.inner;
        let now = Instant::now();
        let mut hits = state.hits.lock().unwrap();

        let slot = hits.entry(ip.to_string()).or_insert(WindowSlot {
            count: 0,
            window_start: now,
        });

        if now.duration_since(slot.window_start) >= state.window {
            slot.count = 0;
            slot.window_start = now;
        }

        if slot.count >= state.limit {
            log::warn!(
                "Rate limit '{}' exceeded for ip: {} ({} per {:?})",
                state.scope,
                ip,
                state.limit,
                state.window
            );
            return Err(state.error_body.clone());
        }

        slot.count += 1;
        Ok(())
    }
}

/// Middleware implementation for rate limiting
impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.limiter.inner.enabled {
            let ip = get_client_ip(&req);
            if let Err(body) = self.limiter.check(&ip) {
                // Answer 429 directly without waking the inner service
                let (request, _payload) = req.into_parts();
                let response = HttpResponse::TooManyRequests()
                    .json(body)
                    .map_into_right_body();
                return Box::pin(ready(Ok(ServiceResponse::new(request, response))));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
    }
}

/// Get client IP address from request
fn get_client_ip(req: &ServiceRequest) -> String {
    // X-Forwarded-For first, for reverse proxy deployments
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
