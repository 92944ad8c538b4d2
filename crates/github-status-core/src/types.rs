//! Wire types for the commit status API

use std::fmt;

use serde::{
    Serialize,
    Serializer,
};

/// State reported for a commit status.
///
/// The four canonical states have their own variants. `Other` only comes
/// from an upstream build status that is passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusState {
    Success,
    Failure,
    Error,
    Pending,
    Other(String),
}

impl StatusState {
    /// Parses one of the four canonical state names
    pub fn canonical(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "error" => Some(Self::Error),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    /// Canonical state when `value` names one, `Other` otherwise
    pub fn passthrough(value: &str) -> Self {
        Self::canonical(value).unwrap_or_else(|| Self::Other(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Error => "error",
            Self::Pending => "pending",
            Self::Other(value) => value,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Request body for `POST /repos/{owner}/{repo}/statuses/{sha}`
#[derive(Debug, Clone, Serialize)]
pub struct RepoStatus {
    pub description: String,
    pub state: StatusState,
    pub target_url: String,
    pub context: String,
}
