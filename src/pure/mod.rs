//! Pure state types for the window manager: no X calls are made from this
//! module, which keeps the interesting invariants testable without a server.
pub mod client;
pub mod geometry;
pub mod workspace;

pub use client::{Client, ClientTable};
pub use geometry::{Point, Rect};
pub use workspace::{Direction, Workspace, WORKSPACES};
