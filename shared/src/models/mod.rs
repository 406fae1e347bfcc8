//! Domain models for SpaceRain

mod condition;
mod request;
mod response;

pub use condition::*;
pub use request::*;
pub use response::*;
