//! Data types for working with X events
use crate::{
    pure::geometry::{Point, Rect},
    Xid,
};
use bitflags::bitflags;

/// Wrapper around the low level X event types that the window manager
/// responds to.
///
/// The event set is fixed by the protocol so this is a closed enumeration:
/// the main loop dispatches by matching on the variant, one handler per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XEvent {
    /// A grabbed modifier-button combination was pressed inside a client
    ButtonPress(ButtonEvent),
    /// A message has been sent to a particular client
    ClientMessage(ClientMessage),
    /// A client is requesting to be repositioned
    ConfigureRequest(ConfigureEvent),
    /// The mouse pointer has entered a new client window
    Enter(PointerChange),
    /// A client has gained input focus
    FocusIn(Xid),
    /// A client window is requesting to be positioned and rendered on the screen
    MapRequest(Xid),
    /// The pointer has moved while a grabbed button is held
    MotionNotify(MotionEvent),
    /// A client is being unmapped
    UnmapNotify(Xid),
}

impl std::fmt::Display for XEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use XEvent::*;

        match self {
            ButtonPress(_) => write!(f, "ButtonPress"),
            ClientMessage(_) => write!(f, "ClientMessage"),
            ConfigureRequest(_) => write!(f, "ConfigureRequest"),
            Enter(_) => write!(f, "Enter"),
            FocusIn(_) => write!(f, "FocusIn"),
            MapRequest(_) => write!(f, "MapRequest"),
            MotionNotify(_) => write!(f, "MotionNotify"),
            UnmapNotify(_) => write!(f, "UnmapNotify"),
        }
    }
}

bitflags! {
    /// The grabbed mouse buttons held down during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeldButtons: u8 {
        /// Button1: moves the window under the pointer
        const LEFT = 1 << 0;
        /// Button3: resizes the window under the pointer
        const RIGHT = 1 << 1;
    }
}

/// A grabbed button press starting a modal move or resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonEvent {
    /// The window the grab fired for
    pub id: Xid,
    /// The cursor position in root coordinates
    pub abs: Point,
}

/// Pointer motion within a grabbed modal gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionEvent {
    /// The window being dragged or resized
    pub id: Xid,
    /// The cursor position in root coordinates
    pub abs: Point,
    /// The buttons held for the duration of the gesture
    pub held: HeldButtons,
}

/// A notification that the mouse pointer has entered a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerChange {
    /// The ID of the window that was entered
    pub id: Xid,
    /// The cursor position in root coordinates
    pub abs: Point,
}

/// A configure request from a client that wants to change position or size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigureEvent {
    /// The ID of the window making the request
    pub id: Xid,
    /// The requested geometry
    pub r: Rect,
    /// Is this window the root window?
    pub is_root: bool,
}

/// A client message that needs to be parsed and handled based on its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMessage {
    /// The ID of the window the message was sent to
    pub id: Xid,
    /// The name of the message type atom
    pub dtype: String,
    /// The message payload (format 32)
    pub data: [u32; 5],
}

impl ClientMessage {
    /// Build a new ClientMessage from its parts.
    pub fn new(id: Xid, dtype: impl Into<String>, data: [u32; 5]) -> Self {
        Self {
            id,
            dtype: dtype.into(),
            data,
        }
    }
}
