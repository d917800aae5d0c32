use thiserror::Error;

/// Errors raised while resolving the scan configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A numeric setting that must be positive was zero.
    #[error("Setting '{0}' must be at least 1")]
    NotPositive(&'static str),

    /// The query template was empty.
    #[error("A query template is required")]
    MissingQueryTemplate,

    /// A cluster was configured without any host.
    #[error("No hosts configured for the {0} cluster")]
    MissingHosts(&'static str),
}
