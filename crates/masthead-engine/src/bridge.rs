#![forbid(unsafe_code)]

//! Content bridge: the message channel to the hosted content surface.
//!
//! The only message this crate sends is `setPaddingTop`, which must reach the
//! content renderer before any content is composed so that nothing renders
//! underneath the header. Transport internals are the host's concern; the
//! engine only needs [`ContentBridge::send`].
//!
//! # Failure modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Payload does not encode | Contract violation: panics (never swallowed) |
//! | Transport rejects the message | `BridgeError::Transport`, logged by the engine |

use std::fmt;

use serde::Serialize;

/// Operation name of the padding message.
pub const SET_PADDING_TOP: &str = "setPaddingTop";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced by a bridge transport.
#[derive(Debug)]
pub enum BridgeError {
    /// The transport could not deliver the message.
    Transport(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Transport(msg) => write!(f, "bridge transport error: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A structured message for the content surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeMessage {
    /// Operation name, e.g. `setPaddingTop`.
    pub action: &'static str,
    /// JSON payload for the operation.
    pub payload: serde_json::Value,
}

#[derive(Serialize)]
struct PaddingPayload {
    #[serde(rename = "paddingTop")]
    padding_top: i32,
}

impl BridgeMessage {
    /// Build the `setPaddingTop` message.
    ///
    /// Encoding this payload cannot legitimately fail; a failure here is an
    /// internal contract violation and panics rather than being swallowed.
    pub fn set_padding_top(padding_dp: i32) -> Self {
        let payload = serde_json::to_value(PaddingPayload {
            padding_top: padding_dp,
        })
        .expect("padding payload must encode");
        Self {
            action: SET_PADDING_TOP,
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Transport contract
// ---------------------------------------------------------------------------

/// Abstract bidirectional messaging channel to the hosted content surface.
///
/// Implementations own ordering: messages must reach the surface in the
/// order they were sent.
pub trait ContentBridge {
    /// Deliver a message to the content surface.
    fn send(&mut self, message: &BridgeMessage) -> BridgeResult<()>;
}

/// A bridge that records every message, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    sent: Vec<BridgeMessage>,
}

impl RecordingBridge {
    /// Create an empty recording bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far, in order.
    pub fn sent(&self) -> &[BridgeMessage] {
        &self.sent
    }

    /// The padding values delivered via `setPaddingTop`, in order.
    pub fn padding_history(&self) -> Vec<i32> {
        self.sent
            .iter()
            .filter(|msg| msg.action == SET_PADDING_TOP)
            .filter_map(|msg| msg.payload.get("paddingTop"))
            .filter_map(serde_json::Value::as_i64)
            .map(|v| v as i32)
            .collect()
    }
}

impl ContentBridge for RecordingBridge {
    fn send(&mut self, message: &BridgeMessage) -> BridgeResult<()> {
        self.sent.push(message.clone());
        Ok(())
    }
}

/// Shared single-threaded handles work as bridges, letting a host (or test)
/// keep a handle for inspection while the engine owns another.
impl<B: ContentBridge> ContentBridge for std::rc::Rc<std::cell::RefCell<B>> {
    fn send(&mut self, message: &BridgeMessage) -> BridgeResult<()> {
        self.borrow_mut().send(message)
    }
}
