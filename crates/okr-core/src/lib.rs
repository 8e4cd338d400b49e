pub mod achievement;
pub mod aggregate;
pub mod classify;
pub mod error;
pub mod period;
pub mod rollup;
pub mod scorecard;
pub mod types;

pub use classify::PerformanceBand;
pub use error::OkrError;
pub use period::PeriodSelection;
pub use types::*;

/// Standard result type for all scorecard operations
pub type OkrResult<T> = Result<T, OkrError>;
