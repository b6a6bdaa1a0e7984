pub mod otp_record;

pub use otp_record::*;
