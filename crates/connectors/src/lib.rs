pub mod error;
pub mod executor;
pub mod fixture;
pub mod memory;

#[cfg(feature = "cassandra")]
pub mod cassandra;
