pub mod consistency;
pub mod task;
