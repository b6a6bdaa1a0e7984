//! OTP endpoints

use std::sync::Arc;

use ce_core::repositories::otp::OtpStore;
use ce_core::services::otp::{OtpService, SmsChannel};

pub mod send;
pub mod verify;

pub use send::send_otp;
pub use verify::verify_otp;

/// Application state that holds shared services
pub struct AppState<S, R>
where
    S: SmsChannel,
    R: OtpStore,
{
    pub otp_service: Arc<OtpService<S, R>>,
}
