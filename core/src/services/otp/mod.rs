//! OTP issuance and verification service
//!
//! The moving parts, leaves first: the code [`generator`], the pure
//! issue/attempt [`policy`], the [`traits::SmsChannel`] delivery seam,
//! the [`service::OtpService`] that ties them to the subject store, and
//! the background [`sweeper`] that purges expired records.

pub mod config;
pub mod generator;
pub mod policy;
pub mod service;
pub mod sweeper;
pub mod traits;
pub mod types;

pub use config::OtpServiceConfig;
pub use generator::generate_code;
pub use policy::{may_attempt, may_issue, AttemptDecision, IssueDecision};
pub use service::OtpService;
pub use sweeper::{OtpSweeper, SweeperConfig, SweeperHandle};
pub use traits::SmsChannel;
pub use types::IssueOutcome;

#[cfg(test)]
mod tests;
