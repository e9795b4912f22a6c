//! Logic for interacting with the X server
use crate::{
    pure::{geometry::Point, geometry::Rect, workspace::Workspace},
    Result, Xid,
};

pub mod atom;
pub mod event;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub use mock::MockXConn;

pub use atom::{Atom, EWMH_SUPPORTED_ATOMS, UNMANAGED_WINDOW_TYPES};
pub use event::{
    ButtonEvent, ClientMessage, ConfigureEvent, HeldButtons, MotionEvent, PointerChange, XEvent,
};

/// The window attributes the manager inspects before framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAttributes {
    /// Whether the window has asked to bypass window management entirely
    pub override_redirect: bool,
    /// Whether the window is currently viewable
    pub viewable: bool,
}

/// A handle on a running X11 connection that we can use for issuing X
/// requests.
///
/// XConn is the boundary between the event-loop state machine and the display
/// server: everything the manager needs from X is expressed here as a small
/// typed operation, which is what allows the whole state machine to be driven
/// by a mock connection in tests. Implementations are expected to report
/// per-window protocol errors through their `Result`s and leave recovery to
/// the caller: windows routinely disappear between a query and the operation
/// that follows it.
pub trait XConn {
    /// The ID of the window manager root window.
    fn root(&self) -> Xid;
    /// The dimensions of the root screen.
    fn screen_size(&self) -> Rect;
    /// Block and wait for the next event from the X server.
    ///
    /// Implementations must coalesce runs of queued MotionNotify events for
    /// the same window down to the latest one: only the final cursor position
    /// matters for a drag or resize.
    fn next_event(&self) -> Result<XEvent>;
    /// Flush any pending requests to the X server.
    fn flush(&self);

    /// Subscribe to substructure redirection on the root window, erroring
    /// with [WindowManagerDetected][crate::Error::WindowManagerDetected] if
    /// another window manager already holds it.
    fn become_window_manager(&self) -> Result<()>;
    /// Grab the X server, blocking request processing for other clients.
    fn grab_server(&self) -> Result<()>;
    /// Release a server grab taken with [XConn::grab_server].
    fn ungrab_server(&self) -> Result<()>;
    /// The IDs of all current top level windows under the root.
    fn existing_clients(&self) -> Result<Vec<Xid>>;

    /// Look up the [WindowAttributes] for a given window.
    fn window_attributes(&self, client: Xid) -> Result<WindowAttributes>;
    /// Look up the current position and size of a given window.
    fn window_geometry(&self, client: Xid) -> Result<Rect>;
    /// The `_NET_WM_WINDOW_TYPE` atoms set on a given window, if any.
    fn window_types(&self, client: Xid) -> Result<Vec<Atom>>;

    /// Set both the position and size of a window.
    fn position_window(&self, client: Xid, r: Rect) -> Result<()>;
    /// Move a window to the given origin without resizing it.
    fn move_window(&self, client: Xid, p: Point) -> Result<()>;
    /// Resize a window in place.
    fn resize_window(&self, client: Xid, w: u32, h: u32) -> Result<()>;
    /// Map the given window to the screen, making it visible.
    fn map_window(&self, client: Xid) -> Result<()>;
    /// Raise the given window to the top of the stacking order.
    fn raise_window(&self, client: Xid) -> Result<()>;
    /// Apply the manager's border and background decoration to a window.
    fn set_window_decorations(&self, client: Xid, border: u32, color: u32, bg: u32) -> Result<()>;
    /// Subscribe to the event set the manager needs from a framed client.
    fn select_client_events(&self, client: Xid) -> Result<()>;
    /// Grab the modifier-button combinations driving move and resize.
    fn grab_drag_buttons(&self, client: Xid) -> Result<()>;

    /// Set X input focus to be held by the given client window.
    fn focus_window(&self, client: Xid) -> Result<()>;
    /// Revert X input focus to the root (PointerRoot).
    fn focus_root(&self) -> Result<()>;

    /// Publish the identity properties that mark this connection as an
    /// EWMH-compliant window manager.
    fn init_wm_properties(&self, wm_name: &str) -> Result<()>;
    /// Publish the given client as `_NET_ACTIVE_WINDOW` on the root.
    fn set_active_window(&self, client: Xid) -> Result<()>;
    /// Remove `_NET_ACTIVE_WINDOW` from the root entirely.
    fn clear_active_window(&self) -> Result<()>;
    /// Publish the current workspace as `_NET_CURRENT_DESKTOP` on the root.
    fn set_current_workspace(&self, ws: Workspace) -> Result<()>;

    /// Ask a client to close itself via the `WM_DELETE_WINDOW` protocol.
    fn send_delete(&self, client: Xid) -> Result<()>;
}
