use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid key range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
}
