//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{DISPLAY_SCALE, SETTLEMENT_TOLERANCE, is_negligible, round_for_display};
