//! SpaceRain client
//!
//! Lets a user pick an event date, a coordinate and a set of weather-risk
//! conditions, submits them to the analysis service and renders the
//! per-condition results.

pub mod config;
pub mod error;
pub mod external;
pub mod orchestrator;
pub mod selector;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use orchestrator::{AnalysisSession, PendingSubmission, RequestOrchestrator, SessionStatus};
pub use selector::{CoordinateSelector, CoordinateSource, CoordinateUpdate};
