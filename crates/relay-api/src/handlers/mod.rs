//! Route handlers

pub mod health;
pub mod prepare;
pub mod submit;

pub use health::health_check;
pub use prepare::prepare_transaction;
pub use submit::submit_transaction;
