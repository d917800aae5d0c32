pub mod cluster;
pub mod error;
pub mod validated;

pub use cluster::ClusterSettings;
pub use error::SettingsError;
pub use validated::{ScanSettings, ScanSettingsBuilder};
