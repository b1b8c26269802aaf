//! Structured messages exchanged over the bus.
//!
//! A message is an open JSON object. One key is reserved: `info` names the
//! message intent. Everything else is opaque payload.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key carrying the message intent.
pub const INFO_KEY: &str = "info";

/// What a message is for, as read from its `info` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Handshake: a port for a dedicated channel is attached.
    ChannelOffer,
    /// Ask the host to resolve and announce a new feature.
    NewFeature,
    /// Relay to every other surface.
    Broadcast,
    /// Application data with some other intent.
    Other(String),
    /// No `info` key at all.
    Missing,
}

impl Intent {
    /// Classify an `info` value. Matching is by substring, checked in a
    /// fixed order, so "new feature broadcast" is a `NewFeature`.
    pub fn classify(info: &str) -> Self {
        if info.contains("port") {
            Intent::ChannelOffer
        } else if info.contains("new feature") {
            Intent::NewFeature
        } else if info.contains("broadcast") {
            Intent::Broadcast
        } else {
            Intent::Other(info.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// A message whose `info` is `info`.
    pub fn with_info(info: impl Into<String>) -> Self {
        Self::new().with(INFO_KEY, info.into())
    }

    /// The handshake offer that accompanies a port.
    pub fn handshake() -> Self {
        Self::with_info("port")
    }

    /// Announcement that a feature was resolved and can be embedded.
    pub fn created_feature(src: &str, srcdoc: Option<&str>) -> Self {
        let mut msg = Self::with_info("created feature").with("src", src);
        if let Some(doc) = srcdoc {
            msg = msg.with("srcdoc", doc);
        }
        msg
    }

    /// Parse a JSON object. Anything else is not a message.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<Value>(raw).ok().and_then(Self::from_value)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The `info` value when it is a string.
    pub fn info(&self) -> Option<&str> {
        self.get_str(INFO_KEY)
    }

    pub fn intent(&self) -> Intent {
        match self.0.get(INFO_KEY) {
            None => Intent::Missing,
            Some(Value::String(s)) => Intent::classify(s),
            Some(other) => Intent::Other(other.to_string()),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("{}"),
        }
    }
}
