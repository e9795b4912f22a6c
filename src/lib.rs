//! Cardinal is a minimal stacking window manager for X11 with five virtual
//! workspaces laid out as a compass: Center, West, East, North and South.
//!
//! The crate is structured as a library so that the full event-loop state
//! machine can be driven and tested without a running X server:
//!
//!   - [pure][crate::pure] contains the data structures owned by the event
//!     loop: the managed-client table, the workspace compass and simple
//!     geometry.
//!   - [x][crate::x] defines the [XConn][crate::x::XConn] trait: the typed
//!     surface over the display server that the manager consumes.
//!   - [x11rb][crate::x11rb] is the production implementation of that trait.
//!   - [core][crate::core] is the window manager itself: bootstrap, event
//!     dispatch and the operations reachable over the `WM_REQUEST` command
//!     channel.
//!
//! The `cardinal` binary runs the manager; `cardinalc` injects commands into
//! a running instance from the shell.
#![warn(
    clippy::complexity,
    clippy::correctness,
    clippy::style,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unsafe_code
)]

use std::ops::Deref;

pub mod core;
pub mod pure;
pub mod x;
pub mod x11rb;

/// Error variants from the core window manager logic and its X backend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unable to establish a connection to the X server
    #[error(transparent)]
    Connect(#[from] ::x11rb::errors::ConnectError),

    /// The X11 connection broke
    #[error(transparent)]
    Connection(#[from] ::x11rb::errors::ConnectionError),

    /// Unable to get a request reply from the X server
    #[error(transparent)]
    Reply(#[from] ::x11rb::errors::ReplyError),

    /// Unable to get a request reply or allocate a fresh resource id
    #[error(transparent)]
    ReplyOrId(#[from] ::x11rb::errors::ReplyOrIdError),

    /// A mock method was called without an implementation being provided
    #[error("mock method not implemented")]
    UnimplementedMock,

    /// An operation referenced a client that is not known to the X server
    #[error("{0} is not a known client window")]
    UnknownClient(Xid),

    /// Another window manager already holds the substructure redirect on the root
    #[error("unable to take ownership of the display: another window manager is running")]
    WindowManagerDetected,

    /// An error was returned by the X server
    #[error("X11 error: {0:?}")]
    X11Error(::x11rb::x11_utils::X11Error),
}

/// A Result where the error type is a crate level [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// An X11 ID for a given resource
#[derive(Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Xid(pub(crate) u32);

impl std::fmt::Display for Xid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Xid {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<Xid> for u32 {
    fn from(id: Xid) -> Self {
        id.0
    }
}
