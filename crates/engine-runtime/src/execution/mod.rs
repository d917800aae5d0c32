pub mod executor;
pub mod handler;
pub mod pool;
pub mod scanner;
