pub mod canonical;
pub mod diff;
pub mod error;
pub mod limiter;
pub mod metrics;
pub mod partition;
