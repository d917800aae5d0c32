pub mod range;
pub mod value;
