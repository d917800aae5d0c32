use serde::Serialize;
use std::fmt;

/// Address and credentials for one side of the comparison.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct ClusterSettings {
    pub hosts: Vec<String>,
    pub port: u16,
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
}

impl ClusterSettings {
    pub fn new(hosts: &str, port: u16) -> Self {
        Self {
            hosts: parse_hosts(hosts),
            port,
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username.filter(|u| !u.is_empty());
        self.password = password.filter(|p| !p.is_empty());
        self
    }
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self::new("localhost", 9042)
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for ClusterSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterSettings")
            .field("hosts", &self.hosts)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Splits a comma-separated host list, dropping blanks.
pub fn parse_hosts(hosts: &str) -> Vec<String> {
    hosts
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hosts() {
        assert_eq!(
            parse_hosts("10.0.0.1, 10.0.0.2,,"),
            vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()]
        );
        assert!(parse_hosts(" ").is_empty());
    }

    #[test]
    fn test_debug_hides_password() {
        let cluster = ClusterSettings::new("db", 9042)
            .with_credentials(Some("scan".into()), Some("hunter2".into()));
        let rendered = format!("{cluster:?}");
        assert!(rendered.contains("scan"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_empty_credentials_are_dropped() {
        let cluster = ClusterSettings::default()
            .with_credentials(Some(String::new()), Some(String::new()));
        assert_eq!(cluster.username, None);
        assert_eq!(cluster.password, None);
    }
}
