//! HTTP request handlers

pub mod health;
pub mod probability;

pub use health::health_check;
pub use probability::calculate_probability;
