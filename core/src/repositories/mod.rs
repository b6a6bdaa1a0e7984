//! Repository interfaces and in-process implementations

pub mod otp;

pub use otp::*;
