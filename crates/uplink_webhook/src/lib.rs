pub mod config;
pub mod http;
pub mod metrics;
pub mod telemetry;

pub use config::ServiceConfig;
pub use http::{build_router, ApiError, AppState};
