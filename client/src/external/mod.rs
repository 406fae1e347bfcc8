//! External service integrations

pub mod analysis;
pub mod geolocation;

pub use analysis::{AnalysisClient, AnalysisService};
pub use geolocation::{GeolocationError, GeolocationProvider, IpGeolocation, NoGeolocation};
