use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerKind {
    User,
    Chat,
    Channel,
}

impl Display for PeerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeerKind::User => write!(f, "user"),
            PeerKind::Chat => write!(f, "chat"),
            PeerKind::Channel => write!(f, "channel"),
        }
    }
}

/// Platform assigned identity of a peer. Two peers are the same conversation
/// exactly when their keys are equal.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerKey {
    kind: PeerKind,
    id: i64,
}

impl PeerKey {
    pub fn new(kind: PeerKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl Display for PeerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PeerKeyParseError {
    #[error("peer {0} should look like <kind>:<id>")]
    MissingSeparator(String),
    #[error("unknown peer kind {0}")]
    UnknownKind(String),
    #[error("peer id {0} should be numeric")]
    InvalidId(String),
}

impl FromStr for PeerKey {
    type Err = PeerKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| PeerKeyParseError::MissingSeparator(s.to_string()))?;
        let kind = match kind {
            "user" => PeerKind::User,
            "chat" => PeerKind::Chat,
            "channel" => PeerKind::Channel,
            _ => return Err(PeerKeyParseError::UnknownKind(kind.to_string())),
        };
        let id = id
            .parse::<i64>()
            .map_err(|_| PeerKeyParseError::InvalidId(id.to_string()))?;

        Ok(Self { kind, id })
    }
}

/// A peer as it appears in a folder's member list.
///
/// Equality compares the whole value, including display metadata. Use
/// [`Peer::key`] when asking whether two entries are the same conversation.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    #[serde(flatten)]
    key: PeerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Peer {
    pub fn new(key: PeerKey) -> Self {
        Self { key, label: None }
    }

    #[cfg(test)]
    pub fn with_label(key: PeerKey, label: impl Into<String>) -> Self {
        Self {
            key,
            label: Some(label.into()),
        }
    }

    pub fn key(&self) -> PeerKey {
        self.key
    }

    pub fn is(&self, other: &Peer) -> bool {
        self.key == other.key
    }
}

impl From<PeerKey> for Peer {
    fn from(value: PeerKey) -> Self {
        Self::new(value)
    }
}

impl Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{} ({label})", self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}
