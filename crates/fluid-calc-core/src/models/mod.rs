//! Domain models for the fluid calculator.

mod patient;
mod record;

pub use patient::*;
pub use record::*;
