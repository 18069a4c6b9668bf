//! Pure scoring functions: aggregation, confidence, status and reasons.

pub mod aggregate;
pub mod confidence;
pub mod reasons;
pub mod status;

pub use aggregate::{aggregate, Aggregate};
pub use confidence::{estimate_confidence, ConfidenceFactors};
pub use reasons::compose_reasons;
pub use status::{Reliability, VerificationStatus};
