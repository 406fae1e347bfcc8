//! Shared types and models for SpaceRain
//!
//! This crate contains the data model, local validation and result
//! presentation shared between the command-line client, the development
//! analysis service and the browser front end (via WASM).

pub mod models;
pub mod render;
pub mod types;
pub mod validation;

pub use models::*;
pub use render::*;
pub use types::*;
pub use validation::*;
