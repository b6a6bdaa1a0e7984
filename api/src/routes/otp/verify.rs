//! Handler for POST /otp/verify

use actix_web::{web, HttpResponse};

use ce_core::errors::OtpError;
use ce_core::repositories::otp::OtpStore;
use ce_core::services::otp::SmsChannel;
use ce_shared::utils::phone::{mask_phone, normalize_phone};

use crate::dto::otp::{OtpFailureResponse, VerifyOtpRequest, VerifyOtpResponse};

use super::AppState;

/// Verifies a submitted passcode.
///
/// Responses:
/// - 200 `{success, message, phoneNumber}` when the code matches
/// - 400 `{success: false, error}` for missing input and every
///   verification failure (not found, expired, exhausted, mismatch)
/// - 500 `{success: false, error}` for unexpected faults
pub async fn verify_otp<S, R>(
    state: web::Data<AppState<S, R>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: SmsChannel + 'static,
    R: OtpStore + 'static,
{
    let (Some(raw_phone), Some(otp)) = (
        request
            .phone_number
            .as_deref()
            .filter(|p| !p.trim().is_empty()),
        request.otp.as_deref().filter(|o| !o.trim().is_empty()),
    ) else {
        return HttpResponse::BadRequest()
            .json(OtpFailureResponse::new("Phone number and OTP are required"));
    };

    log::info!(
        "Processing verify request for phone: {}",
        mask_phone(raw_phone)
    );

    match state.otp_service.verify(raw_phone, otp).await {
        Ok(()) => {
            // Normalization succeeded inside the service, so this cannot miss
            let phone_number =
                normalize_phone(raw_phone).unwrap_or_else(|| raw_phone.to_string());
            log::info!("OTP verified for {}", mask_phone(&phone_number));
            HttpResponse::Ok().json(VerifyOtpResponse {
                success: true,
                message: "OTP verified successfully".to_string(),
                phone_number,
            })
        }
        Err(OtpError::Internal { message }) => {
            log::error!("Verify OTP failed unexpectedly: {}", message);
            HttpResponse::InternalServerError()
                .json(OtpFailureResponse::new("Internal server error"))
        }
        Err(error) => {
            log::info!(
                "OTP verification failed for {}: {}",
                mask_phone(raw_phone),
                error
            );
            HttpResponse::BadRequest().json(OtpFailureResponse::new(error))
        }
    }
}
