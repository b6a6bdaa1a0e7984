//! Subject store: one outstanding passcode record per phone number

pub mod memory;
pub mod store;

pub use memory::InMemoryOtpStore;
pub use store::OtpStore;
