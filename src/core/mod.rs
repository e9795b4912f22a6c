//! The window manager event loop and its managed-client state machine.
use crate::{
    pure::{Client, ClientTable, Direction, Point, Rect, Workspace},
    x::{
        Atom, ButtonEvent, ClientMessage, ConfigureEvent, HeldButtons, MotionEvent, PointerChange,
        XConn, XEvent, UNMANAGED_WINDOW_TYPES,
    },
    Result, Xid,
};
use tracing::{debug, error, info, trace, warn};

pub mod rpc;

use rpc::Request;

/// The name published for this window manager via `_NET_WM_NAME`.
pub const WM_NAME: &str = "cardinal";

/// No client is ever sized below this many pixels on either axis.
pub const MIN_WIN_PX: u32 = 64;

/// Border width in pixels applied to every framed client.
pub const BORDER_PX: u32 = 5;

/// Border colour applied to every framed client.
pub const BORDER_COLOR: u32 = 0xff0000;

/// Background colour applied to every framed client.
pub const BG_COLOR: u32 = 0x0000ff;

// Captured on ButtonPress and consumed by MotionNotify: where the cursor and
// the window were when the gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    cursor: Point,
    origin: Point,
    size: (u32, u32),
}

/// A top level struct holding all of the state required to run as an X11
/// window manager.
///
/// The manager runs a single threaded event loop: each incoming [XEvent] is
/// dispatched to one handler which runs to completion, mutating the client
/// table and issuing requests through the [XConn]. Handler errors are logged
/// and absorbed; only losing the X connection itself (or failing bootstrap)
/// takes the loop down.
#[derive(Debug)]
pub struct WindowManager<X>
where
    X: XConn,
{
    x: X,
    clients: ClientTable,
    current: Workspace,
    screen: Rect,
    reserved_upper: u32,
    reserved_lower: u32,
    drag: Option<Drag>,
    running: bool,
}

impl<X> WindowManager<X>
where
    X: XConn,
{
    /// Construct a new [WindowManager] around an established X connection.
    pub fn new(x: X) -> Result<Self> {
        let screen = x.screen_size();

        Ok(Self {
            x,
            clients: ClientTable::new(),
            current: Workspace::Center,
            screen,
            reserved_upper: 0,
            reserved_lower: 0,
            drag: None,
            running: true,
        })
    }

    /// Take control of the display and run the event loop until an `exit`
    /// request is received.
    ///
    /// Fails fast if another window manager is already running. Pre-existing
    /// viewable windows are framed as though they had just been mapped.
    pub fn run(mut self) -> Result<()> {
        self.x.become_window_manager()?;
        self.manage_existing_clients()?;
        self.x.init_wm_properties(WM_NAME)?;
        self.x.flush();
        info!(screen = ?self.screen, "managing display");

        while self.running {
            match self.x.next_event() {
                Ok(event) => {
                    trace!(%event, "handling event");
                    if let Err(error) = self.handle_xevent(event) {
                        error!(%error, "error handling event");
                    }
                    self.x.flush();
                }

                Err(error @ crate::Error::Connection(_)) => return Err(error),

                Err(error) => error!(%error, "error pulling next x event"),
            }
        }

        Ok(())
    }

    // Existing top level windows are swept up under a server grab so none can
    // map or unmap between the query and the framing.
    fn manage_existing_clients(&mut self) -> Result<()> {
        self.x.grab_server()?;

        for id in self.x.existing_clients()? {
            if let Err(error) = self.frame(id, true) {
                warn!(%id, %error, "unable to frame existing window");
            }
        }

        self.x.ungrab_server()
    }

    fn handle_xevent(&mut self, event: XEvent) -> Result<()> {
        match event {
            XEvent::ButtonPress(e) => self.on_button_press(e),
            XEvent::ClientMessage(m) => self.on_client_message(m),
            XEvent::ConfigureRequest(e) => self.on_configure_request(e),
            XEvent::Enter(p) => self.on_enter(p),
            XEvent::FocusIn(id) => {
                trace!(%id, "focus moved");
                Ok(())
            }
            XEvent::MapRequest(id) => self.on_map_request(id),
            XEvent::MotionNotify(e) => self.on_motion(e),
            XEvent::UnmapNotify(id) => self.on_unmap_notify(id),
        }
    }

    // A client owns its geometry until it is framed, and keeps the right to
    // request changes afterwards; managed windows additionally have the
    // request mirrored into their cached geometry.
    fn on_configure_request(&mut self, e: ConfigureEvent) -> Result<()> {
        let mut r = e.r;

        if let Some(client) = self.clients.get_mut(e.id) {
            r.w = r.w.max(MIN_WIN_PX);
            r.h = r.h.max(MIN_WIN_PX);
            client.geometry = r;
        }

        self.x.position_window(e.id, r)
    }

    fn on_map_request(&mut self, id: Xid) -> Result<()> {
        if self.clients.contains(id) {
            return Ok(());
        }

        let managed = self.frame(id, false)?;
        self.x.map_window(id)?;

        if managed {
            self.focus(id)?;
        }

        Ok(())
    }

    fn on_unmap_notify(&mut self, id: Xid) -> Result<()> {
        if !self.clients.contains(id) {
            trace!(%id, "ignoring UnmapNotify for non-client window");
            return Ok(());
        }

        self.unframe(id)
    }

    // Prime a drag: remember where the cursor and the window are so motion
    // events can be applied as deltas against fixed origins.
    fn on_button_press(&mut self, e: ButtonEvent) -> Result<()> {
        if !self.clients.contains(e.id) {
            return Ok(());
        }

        let r = self.x.window_geometry(e.id)?;
        self.drag = Some(Drag {
            cursor: e.abs,
            origin: r.origin(),
            size: (r.w, r.h),
        });
        trace!(id = %e.id, ?r, "primed drag");

        Ok(())
    }

    fn on_motion(&mut self, e: MotionEvent) -> Result<()> {
        let drag = match self.drag {
            Some(drag) => drag,
            None => return Ok(()),
        };

        let fullscreen = match self.clients.get(e.id) {
            Some(client) => client.is_fullscreen(),
            None => return Ok(()),
        };
        if fullscreen {
            return Ok(());
        }

        let delta = e.abs - drag.cursor;

        if e.held.contains(HeldButtons::LEFT) {
            let p = drag.origin + delta;
            if let Some(client) = self.clients.get_mut(e.id) {
                client.geometry.x = p.x;
                client.geometry.y = p.y;
            }

            self.x.move_window(e.id, p)
        } else if e.held.contains(HeldButtons::RIGHT) {
            let w = (drag.size.0 as i32 + delta.x).max(MIN_WIN_PX as i32) as u32;
            let h = (drag.size.1 as i32 + delta.y).max(MIN_WIN_PX as i32) as u32;
            if let Some(client) = self.clients.get_mut(e.id) {
                client.geometry.w = w;
                client.geometry.h = h;
            }

            self.x.resize_window(e.id, w, h)
        } else {
            Ok(())
        }
    }

    // Focus follows the pointer, with two exceptions: a fullscreen client
    // keeps focus pinned, and entering an unmanaged window (the root under a
    // popup, a dock) is not a focus change.
    fn on_enter(&mut self, p: PointerChange) -> Result<()> {
        let pinned = self.clients.focused().map(|c| c.is_fullscreen());
        if pinned == Some(true) || !self.clients.contains(p.id) {
            return Ok(());
        }

        self.focus(p.id)
    }

    fn on_client_message(&mut self, m: ClientMessage) -> Result<()> {
        if m.dtype != Atom::WmRequest.as_ref() {
            trace!(id = %m.id, dtype = %m.dtype, "ignoring client message");
            return Ok(());
        }

        match Request::decode(&m.data) {
            Some(request) => {
                debug!(?request, "handling request");
                self.handle_request(request)
            }
            None => {
                warn!(data = ?m.data, "ignoring malformed request");
                Ok(())
            }
        }
    }

    fn handle_request(&mut self, request: Request) -> Result<()> {
        match request {
            Request::Move(direction) => self.move_focused(direction),
            Request::Go(direction) => self.switch_workspace(self.current.in_direction(direction)),
            Request::Zoom => self.zoom_focused(),
            Request::Kill => self.kill_focused(),
            Request::Exit => {
                info!("exit requested");
                self.running = false;
                Ok(())
            }
            Request::FocusNext => self.focus_next(),
            Request::FocusPrev => self.focus_prev(),
        }
    }

    /// Accept a window into the managed set.
    ///
    /// Returns `Ok(false)` for windows that are left unmanaged: pre-existing
    /// windows that are unmapped or override-redirect, docks (which register
    /// a reserved strip instead) and the other special window types.
    fn frame(&mut self, id: Xid, pre_existing: bool) -> Result<bool> {
        let attrs = self.x.window_attributes(id)?;
        if pre_existing && (attrs.override_redirect || !attrs.viewable) {
            return Ok(false);
        }

        let types = self.x.window_types(id)?;
        if types.contains(&Atom::NetWindowTypeDock) {
            self.register_dock(id)?;
            return Ok(false);
        }
        if types.iter().any(|t| UNMANAGED_WINDOW_TYPES.contains(t)) {
            trace!(%id, ?types, "declining to manage window");
            return Ok(false);
        }

        let r = self.clamp_to_reserved(self.x.window_geometry(id)?);
        self.x.position_window(id, r)?;
        self.x
            .set_window_decorations(id, BORDER_PX, BORDER_COLOR, BG_COLOR)?;
        self.x.select_client_events(id)?;
        self.clients.insert(Client::new(id, self.current, r));
        self.x.grab_drag_buttons(id)?;
        debug!(%id, ?r, "framed window");

        Ok(true)
    }

    // A dock stays on screen but is never managed; it donates a strip of the
    // screen edge that framed windows are kept out of.
    fn register_dock(&mut self, id: Xid) -> Result<()> {
        let r = self.x.window_geometry(id)?;

        if r.y == 0 {
            self.reserved_upper = r.h;
        } else {
            self.reserved_lower = r.h;
        }
        info!(%id, upper = self.reserved_upper, lower = self.reserved_lower, "registered dock");

        Ok(())
    }

    fn clamp_to_reserved(&self, mut r: Rect) -> Rect {
        r.y = r.y.max(self.reserved_upper as i32);

        let bottom = self.screen.h.saturating_sub(self.reserved_lower) as i32;
        if r.y + r.h as i32 > bottom {
            r.h = (bottom - r.y).max(0) as u32;
        }

        r.w = r.w.max(MIN_WIN_PX);
        r.h = r.h.max(MIN_WIN_PX);

        r
    }

    /// Release a window from the managed set and re-focus.
    fn unframe(&mut self, id: Xid) -> Result<()> {
        self.clients.remove(id);
        debug!(%id, "unframed window");

        self.refocus()
    }

    /// Focus the given client, publish it as the active window and raise it.
    fn focus(&mut self, id: Xid) -> Result<()> {
        self.clients.set_focused(Some(id));
        self.x.set_active_window(id)?;
        self.x.raise_window(id)?;

        self.x.focus_window(id)
    }

    // Recompute focus after a structural change: the last client on the
    // current workspace wins; with none, input reverts to the root and the
    // active window property is withdrawn.
    fn refocus(&mut self) -> Result<()> {
        match self.clients.last_on(self.current) {
            Some(id) => self.focus(id),
            None => {
                self.clients.set_focused(None);
                self.x.clear_active_window()?;
                self.x.focus_root()
            }
        }
    }

    // With no anchor to cycle from, fall back to the top of the workspace.
    fn focus_next(&mut self) -> Result<()> {
        let target = match self.clients.focused_id() {
            Some(anchor) => self.clients.next_on(anchor, self.current),
            None => self.clients.last_on(self.current),
        };

        self.focus_or_ignore(target)
    }

    fn focus_prev(&mut self) -> Result<()> {
        let target = match self.clients.focused_id() {
            Some(anchor) => self.clients.prev_on(anchor, self.current),
            None => self.clients.last_on(self.current),
        };

        self.focus_or_ignore(target)
    }

    fn focus_or_ignore(&mut self, target: Option<Xid>) -> Result<()> {
        match target {
            Some(id) => self.focus(id),
            None => Ok(()),
        }
    }

    /// Switch to the given workspace, hiding the clients of the old one and
    /// showing the clients of the new one.
    fn switch_workspace(&mut self, target: Workspace) -> Result<()> {
        for id in self.clients.ids_on(self.current) {
            self.hide(id)?;
        }

        self.current = target;

        for id in self.clients.ids_on(self.current) {
            self.show(id)?;
        }

        self.x.set_current_workspace(target)?;
        debug!(workspace = %target, "switched workspace\n{}", target.ascii_art());

        self.refocus()
    }

    // Hidden clients stay mapped but live one full screen down and to the
    // right, so the client sees no state change.
    fn hide(&mut self, id: Xid) -> Result<()> {
        let offset = Point::new(self.screen.w as i32, self.screen.h as i32);

        let target = match self.clients.get_mut(id) {
            Some(client) => {
                client.restore = client.geometry.origin();
                client.restore + offset
            }
            None => return Ok(()),
        };

        self.x.move_window(id, target)
    }

    fn show(&mut self, id: Xid) -> Result<()> {
        let target = match self.clients.get_mut(id) {
            Some(client) => {
                let p = client.restore;
                client.geometry.x = p.x;
                client.geometry.y = p.y;
                p
            }
            None => return Ok(()),
        };

        self.x.move_window(id, target)
    }

    fn move_focused(&mut self, direction: Direction) -> Result<()> {
        let id = match self.clients.focused_id() {
            Some(id) => id,
            None => return Ok(()),
        };

        self.move_client(id, self.current.in_direction(direction))
    }

    /// Move a client to another workspace. The client is hidden rather than
    /// shown: by definition the target workspace is not the current one.
    fn move_client(&mut self, id: Xid, target: Workspace) -> Result<()> {
        match self.clients.get_mut(id) {
            Some(client) if client.workspace == target => return Ok(()),
            Some(client) => client.workspace = target,
            None => return Ok(()),
        }
        debug!(%id, workspace = %target, "moved client");

        self.hide(id)?;

        self.refocus()
    }

    fn zoom_focused(&mut self) -> Result<()> {
        match self.clients.focused_id() {
            Some(id) => self.zoom(id),
            None => Ok(()),
        }
    }

    /// Toggle a client between its own geometry and the full usable screen
    /// area: the screen minus the reserved strips and the border.
    fn zoom(&mut self, id: Xid) -> Result<()> {
        let full = Rect::new(
            0,
            self.reserved_upper as i32,
            self.screen.w - 2 * BORDER_PX,
            self.screen.h - self.reserved_upper - self.reserved_lower - 2 * BORDER_PX,
        );

        let r = match self.clients.get_mut(id) {
            None => return Ok(()),
            Some(client) => match client.fullscreen.take() {
                Some(saved) => {
                    client.geometry = saved;
                    saved
                }
                None => {
                    client.fullscreen = Some(client.geometry);
                    client.geometry = full;
                    full
                }
            },
        };
        debug!(%id, ?r, "zoomed client");

        self.x.position_window(id, r)
    }

    fn kill_focused(&mut self) -> Result<()> {
        let id = match self.clients.focused_id() {
            Some(id) => id,
            None => return Ok(()),
        };

        self.x.send_delete(id)?;
        debug!(%id, "requested client deletion");

        self.refocus()
    }
}
