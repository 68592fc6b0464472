pub mod api;
pub mod trade;

pub use api::*;
pub use trade::*;
