//! Web front end for the fluid volume calculator.
//!
//! Serves the input form, renders results, and exposes the stored records
//! as JSON.

pub mod config;
pub mod handlers;
pub mod render;
pub mod router;

pub use config::Config;
pub use render::Templates;
pub use router::{create_router, AppState};
