use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Read consistency requested from the clusters. Passed through to the
/// executor untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    #[default]
    LocalQuorum,
    EachQuorum,
    LocalOne,
    Serial,
    LocalSerial,
}

impl FromStr for ConsistencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANY" => Ok(Self::Any),
            "ONE" => Ok(Self::One),
            "TWO" => Ok(Self::Two),
            "THREE" => Ok(Self::Three),
            "QUORUM" => Ok(Self::Quorum),
            "ALL" => Ok(Self::All),
            "LOCAL_QUORUM" => Ok(Self::LocalQuorum),
            "EACH_QUORUM" => Ok(Self::EachQuorum),
            "LOCAL_ONE" => Ok(Self::LocalOne),
            "SERIAL" => Ok(Self::Serial),
            "LOCAL_SERIAL" => Ok(Self::LocalSerial),
            other => Err(format!("unknown consistency level: {other}")),
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "ANY",
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Quorum => "QUORUM",
            Self::All => "ALL",
            Self::LocalQuorum => "LOCAL_QUORUM",
            Self::EachQuorum => "EACH_QUORUM",
            Self::LocalOne => "LOCAL_ONE",
            Self::Serial => "SERIAL",
            Self::LocalSerial => "LOCAL_SERIAL",
        };
        f.write_str(name)
    }
}
