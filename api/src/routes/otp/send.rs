//! Handler for POST /otp/send

use actix_web::{web, HttpResponse};

use ce_core::errors::OtpError;
use ce_core::repositories::otp::OtpStore;
use ce_core::services::otp::SmsChannel;
use ce_shared::utils::phone::mask_phone;

use crate::dto::otp::{OtpFailureResponse, SendOtpRequest, SendOtpResponse};

use super::AppState;

/// Sends a one-time passcode to the submitted phone number.
///
/// Responses:
/// - 200 `{success, message, phoneNumber, expiresIn}` on delivery
/// - 400 `{success: false, error}` for missing or malformed input
/// - 500 `{success: false, error}` for throttled or failed delivery
pub async fn send_otp<S, R>(
    state: web::Data<AppState<S, R>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: SmsChannel + 'static,
    R: OtpStore + 'static,
{
    let Some(raw_phone) = request
        .phone_number
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    else {
        return HttpResponse::BadRequest()
            .json(OtpFailureResponse::new("Phone number is required"));
    };

    log::info!(
        "Processing send request for phone: {}",
        mask_phone(raw_phone)
    );

    match state.otp_service.issue(raw_phone).await {
        Ok(outcome) => {
            log::info!(
                "OTP sent to {}, message id: {}",
                mask_phone(&outcome.phone),
                outcome.message_id
            );
            HttpResponse::Ok().json(SendOtpResponse {
                success: true,
                message: "OTP sent successfully".to_string(),
                phone_number: outcome.phone,
                expires_in: format!("{} minutes", outcome.expires_in_seconds / 60),
            })
        }
        Err(OtpError::InvalidSubject) => HttpResponse::BadRequest()
            .json(OtpFailureResponse::new("Invalid phone number format")),
        Err(OtpError::Internal { message }) => {
            log::error!("Send OTP failed unexpectedly: {}", message);
            HttpResponse::InternalServerError()
                .json(OtpFailureResponse::new("Internal server error"))
        }
        // Throttling and delivery failures both surface as 500 with the
        // taxonomy's user-facing reason
        Err(error) => {
            log::warn!(
                "Send OTP rejected for {}: {}",
                mask_phone(raw_phone),
                error
            );
            HttpResponse::InternalServerError().json(OtpFailureResponse::new(error))
        }
    }
}
