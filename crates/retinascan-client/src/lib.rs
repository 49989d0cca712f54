//! Client layer: HTTP access to the inference service and the screening
//! session that persists its results.

mod error;
mod http;
mod session;

pub use error::ClientError;
pub use http::{HealthReport, PredictClient, Prediction};
pub use session::ScreeningSession;
