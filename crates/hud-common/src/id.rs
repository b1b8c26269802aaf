use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identity of an embedded surface. Stable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SurfaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identity of a party on the message bus (the host or a surface).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PartyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&SurfaceId> for PartyId {
    fn from(id: &SurfaceId) -> Self {
        Self(id.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn surface_id_display() {
        let id = SurfaceId::new("graph");
        assert_eq!(id.to_string(), "graph");
        assert_eq!(id.as_str(), "graph");
    }

    #[test]
    fn surface_id_from_formatted_string() {
        let index = 2;
        let id: SurfaceId = format!("surface-{index}").into();
        assert_eq!(id, SurfaceId::from("surface-2"));
    }

    #[test]
    fn party_from_surface_shares_identity() {
        let surface = SurfaceId::from("synonyms");
        let party = PartyId::from(&surface);
        assert_eq!(party.as_str(), surface.as_str());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&PartyId::from("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
        let back: SurfaceId = serde_json::from_str("\"s1\"").unwrap();
        assert_eq!(back, SurfaceId::from("s1"));
    }

    #[test]
    fn party_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PartyId::from("a"));
        set.insert(PartyId::from("a"));
        set.insert(PartyId::from("b"));
        assert_eq!(set.len(), 2);
    }
}
