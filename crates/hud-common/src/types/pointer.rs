use serde::{Deserialize, Serialize};
use std::fmt;

use super::Point;

/// Pointer event kinds the host can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Click,
    PointerDown,
    PointerUp,
    MouseOver,
}

impl PointerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerKind::Click => "click",
            PointerKind::PointerDown => "pointerdown",
            PointerKind::PointerUp => "pointerup",
            PointerKind::MouseOver => "mouseover",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "click" => Some(PointerKind::Click),
            "pointerdown" => Some(PointerKind::PointerDown),
            "pointerup" => Some(PointerKind::PointerUp),
            "mouseover" => Some(PointerKind::MouseOver),
            _ => None,
        }
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generic pointer event as it arrives at the host boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    /// The original event payload, carried through untouched.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, point: Point) -> Self {
        Self {
            kind,
            point,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// A fresh copy of this event for re-dispatch inside a surface,
    /// with its point expressed in that surface's local coordinates.
    pub fn synthesize(&self, local: Point) -> Self {
        Self {
            kind: self.kind,
            point: local,
            payload: self.payload.clone(),
        }
    }
}
