//! Error taxonomy for the OTP services

pub mod otp_error;

pub use otp_error::*;
