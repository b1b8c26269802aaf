//! Line protocol between the host process and its embedder.
//!
//! One JSON object per line in each direction, tagged by `type`.

use hud_bus::Message;
use hud_common::{Point, PointerEvent, PointerKind, Rect, SurfaceId};
use hud_router::{Dispatched, HitTarget, LayoutElement, Recipient};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input read from stdin.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostInput {
    /// Pointer event at host coordinates.
    Pointer {
        kind: PointerKind,
        x: f64,
        y: f64,
        #[serde(default)]
        payload: Value,
    },

    /// A surface finished loading its content.
    Loaded { surface: SurfaceId },

    /// A surface's content failed to load.
    Failed { surface: SurfaceId },

    /// A surface reports its bounds and element geometry.
    Layout {
        surface: SurfaceId,
        #[serde(default)]
        bounds: Option<Rect>,
        #[serde(default)]
        elements: Vec<LayoutElement>,
    },

    /// Raw message posted by a surface to the host page.
    Message {
        surface: SurfaceId,
        origin: String,
        message: Message,
    },

    /// A surface sends over its channel (retried once if it has none yet).
    Send { surface: SurfaceId, message: Message },

    /// An event landed on `target` inside `surface` and may be yielded.
    Yield {
        surface: SurfaceId,
        target: HitTarget,
        kind: PointerKind,
        x: f64,
        y: f64,
        #[serde(default)]
        payload: Value,
    },
}

pub(crate) fn pointer_event(kind: PointerKind, x: f64, y: f64, payload: Value) -> PointerEvent {
    PointerEvent::new(kind, Point::new(x, y)).with_payload(payload)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceInfo {
    pub surface: SurfaceId,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Output written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostOutput {
    /// Surfaces that resolved at startup, front first.
    Ready { surfaces: Vec<SurfaceInfo> },

    /// Where a pointer event went.
    Routed {
        kind: PointerKind,
        recipient: Recipient,
    },

    /// A copy of an event delivered into a surface element.
    Dispatch(Dispatched),

    /// A message that reached a surface over its channel.
    Deliver { surface: SurfaceId, message: Message },
}

/// Parse one input line. Malformed lines are logged and skipped.
pub fn parse_input(line: &str) -> Option<HostInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(input) => Some(input),
        Err(e) => {
            tracing::warn!(error = %e, line_len = line.len(), "input line rejected");
            None
        }
    }
}

pub fn encode_output(output: &HostOutput) -> Option<String> {
    match serde_json::to_string(output) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!(error = %e, "output not encodable");
            None
        }
    }
}
