pub mod error;
pub mod execution;

mod tests;
