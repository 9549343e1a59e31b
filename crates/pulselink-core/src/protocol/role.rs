//! Protocol participants and message direction.
//!
//! Every relayed message carries an immutable `(sender, receiver)` pair of
//! roles. A role's kind is fixed at construction; its display name may be
//! renamed later (the session layer renames placeholder roles on heartbeats).

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Closed set of participant kinds, with their wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleKind {
    #[serde(rename = "T_SERVER")]
    Server,
    #[serde(rename = "T_CLIENT")]
    Client,
    #[serde(rename = "APPLICATION")]
    Application,
    #[serde(rename = "PLACEHOLDER")]
    Placeholder,
}

impl RoleKind {
    /// Wire tag for this kind.
    pub fn as_tag(self) -> &'static str {
        match self {
            RoleKind::Server => "T_SERVER",
            RoleKind::Client => "T_CLIENT",
            RoleKind::Application => "APPLICATION",
            RoleKind::Placeholder => "PLACEHOLDER",
        }
    }

    /// Resolve a wire tag; unrecognized tags yield no role.
    pub fn from_tag(tag: &str) -> Result<RoleKind> {
        match tag {
            "T_SERVER" => Ok(RoleKind::Server),
            "T_CLIENT" => Ok(RoleKind::Client),
            "APPLICATION" => Ok(RoleKind::Application),
            "PLACEHOLDER" => Ok(RoleKind::Placeholder),
            other => Err(ProtocolError::UnknownRoleTag(other.to_string())),
        }
    }
}

/// A protocol participant: mutable display name, immutable kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(rename = "type")]
    kind: RoleKind,
}

impl Role {
    pub fn new(kind: RoleKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn server(name: impl Into<String>) -> Self {
        Self::new(RoleKind::Server, name)
    }

    pub fn client(name: impl Into<String>) -> Self {
        Self::new(RoleKind::Client, name)
    }

    pub fn application(name: impl Into<String>) -> Self {
        Self::new(RoleKind::Application, name)
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(RoleKind::Placeholder, name)
    }

    /// Kind is fixed at construction.
    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    /// Update the display name (kind stays fixed).
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Immutable `(sender, receiver)` pair attached to every relayed message.
///
/// Serializes as two nested tagged objects:
/// `{"sender":{"name":..,"type":..},"receiver":{..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDirection {
    pub sender: Role,
    pub receiver: Role,
}

impl MessageDirection {
    pub fn new(sender: Role, receiver: Role) -> Self {
        Self { sender, receiver }
    }

    /// Build a direction from two kinds and two display names.
    pub fn of(
        sender_kind: RoleKind,
        receiver_kind: RoleKind,
        sender_name: impl Into<String>,
        receiver_name: impl Into<String>,
    ) -> Self {
        Self {
            sender: Role::new(sender_kind, sender_name),
            receiver: Role::new(receiver_kind, receiver_name),
        }
    }
}

impl std::fmt::Display for MessageDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[ {} -> {} ] {{{} -> {}}}",
            self.sender.kind().as_tag(),
            self.receiver.kind().as_tag(),
            self.sender.name,
            self.receiver.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tag_round_trip() {
        for kind in [
            RoleKind::Server,
            RoleKind::Client,
            RoleKind::Application,
            RoleKind::Placeholder,
        ] {
            assert_eq!(RoleKind::from_tag(kind.as_tag()).ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_role_tag_is_rejected() {
        let err = RoleKind::from_tag("T_GATEWAY").err();
        assert!(matches!(err, Some(ProtocolError::UnknownRoleTag(_))));
    }

    #[test]
    fn rename_keeps_kind() {
        let mut role = Role::placeholder("boot");
        role.rename("session-42");
        assert_eq!(role.name, "session-42");
        assert_eq!(role.kind(), RoleKind::Placeholder);
    }

    #[test]
    fn direction_serializes_nested_tagged_objects() {
        let dir = MessageDirection::of(RoleKind::Client, RoleKind::Server, "c1", "relay");
        let json = serde_json::to_value(&dir).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "sender": { "name": "c1", "type": "T_CLIENT" },
                "receiver": { "name": "relay", "type": "T_SERVER" },
            }))
        );
    }
}
