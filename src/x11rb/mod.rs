//! An [XConn] implementation on top of the x11rb crate.
//!
//! Requests issued through this backend are unchecked: protocol errors for
//! operations on windows that have already vanished come back through the
//! event stream, where the main loop logs them and carries on. The only
//! request that is explicitly checked is the initial substructure redirect
//! subscription, whose `Access` error is how another running window manager
//! announces itself.
use crate::{
    pure::{
        geometry::{Point, Rect},
        workspace::{Workspace, WORKSPACES},
    },
    x::{
        event::{
            ButtonEvent, ClientMessage, ConfigureEvent, HeldButtons, MotionEvent, PointerChange,
        },
        Atom, WindowAttributes, XConn, XEvent, EWMH_SUPPORTED_ATOMS,
    },
    Error, Result, Xid,
};
use std::{cell::RefCell, collections::HashMap};
use strum::IntoEnumIterator;
use tracing::trace;
use x11rb::{
    connection::Connection,
    errors::ReplyError,
    protocol::{
        xproto::{
            AtomEnum, ButtonIndex, ChangeWindowAttributesAux, ClientMessageEvent,
            ConfigureWindowAux, ConnectionExt as _, CreateWindowAux, EventMask, GrabMode,
            InputFocus, KeyButMask, MapState, ModMask, MotionNotifyEvent, PropMode, StackMode,
            WindowClass,
        },
        ErrorKind, Event,
    },
    rust_connection::RustConnection,
    wrapper::ConnectionExt as _,
    x11_utils::X11Error,
    CURRENT_TIME, NONE,
};

/// The mouse modifier that activates interactive move and resize.
const DRAG_MODIFIER: ModMask = ModMask::M1;

#[derive(Debug)]
struct Atoms {
    atoms: HashMap<Atom, u32>,
}

impl Atoms {
    fn new(conn: &impl Connection) -> Result<Self> {
        // First send all requests, then fetch the replies: one round trip to
        // the server rather than one per atom.
        let cookies = Atom::iter()
            .map(|atom| Ok((atom, conn.intern_atom(false, atom.as_ref().as_bytes())?)))
            .collect::<Result<Vec<_>>>()?;
        let atoms = cookies
            .into_iter()
            .map(|(atom, cookie)| Ok((atom, cookie.reply()?.atom)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self { atoms })
    }

    fn known_atom(&self, atom: Atom) -> u32 {
        self.atoms[&atom]
    }

    fn name_of(&self, id: u32) -> Option<Atom> {
        self.atoms
            .iter()
            .find(|(_, &value)| value == id)
            .map(|(&atom, _)| atom)
    }
}

/// Handles communication with an X server via the x11rb crate.
#[derive(Debug)]
pub struct Conn<C: Connection> {
    conn: C,
    root: Xid,
    check_win: Xid,
    screen: Rect,
    atoms: Atoms,
    // Holds a non-motion event pulled off the queue while coalescing motion
    pending: RefCell<Option<Event>>,
}

/// A production [Conn] backed by a [RustConnection].
pub type RustConn = Conn<RustConnection>;

impl RustConn {
    /// Establish a new connection to the running X server using the DISPLAY
    /// environment variable.
    pub fn new() -> Result<Self> {
        let (conn, screen_ix) = x11rb::connect(None)?;

        Self::new_for_connection(conn, screen_ix)
    }
}

impl<C: Connection> Conn<C> {
    /// Wrap an established connection, interning the atom registry and
    /// creating the hidden `_NET_SUPPORTING_WM_CHECK` window.
    pub fn new_for_connection(conn: C, screen_ix: usize) -> Result<Self> {
        let screen = &conn.setup().roots[screen_ix];
        let root = Xid(screen.root);
        let r = Rect::new(
            0,
            0,
            screen.width_in_pixels as u32,
            screen.height_in_pixels as u32,
        );

        let atoms = Atoms::new(&conn)?;

        let check_win = Xid(conn.generate_id()?);
        let aux = CreateWindowAux::new().override_redirect(1);
        conn.create_window(
            0, // CopyFromParent
            *check_win,
            *root,
            -1,
            -1,
            1,
            1,
            0,
            WindowClass::INPUT_OUTPUT,
            0, // CopyFromParent
            &aux,
        )?;

        Ok(Self {
            conn,
            root,
            check_win,
            screen: r,
            atoms,
            pending: RefCell::new(None),
        })
    }

    fn known_atom(&self, atom: Atom) -> u32 {
        self.atoms.known_atom(atom)
    }

    fn atom_name(&self, id: u32) -> Result<String> {
        if let Some(known) = self.atoms.name_of(id) {
            return Ok(known.as_ref().to_string());
        }

        let reply = self.conn.get_atom_name(id)?.reply()?;

        Ok(String::from_utf8(reply.name).unwrap_or_default())
    }

    // Drain queued MotionNotify events for the same window, keeping the
    // latest. Anything else encountered is stashed for the next pump.
    fn coalesce_motion(&self, mut latest: MotionNotifyEvent) -> Result<MotionNotifyEvent> {
        while let Some(next) = self.conn.poll_for_event()? {
            match next {
                Event::MotionNotify(m) if m.event == latest.event => latest = m,
                other => {
                    self.pending.borrow_mut().replace(other);
                    break;
                }
            }
        }

        Ok(latest)
    }

    fn convert_event(&self, event: Event) -> Result<Option<XEvent>> {
        match event {
            Event::ButtonPress(event) => Ok(Some(XEvent::ButtonPress(ButtonEvent {
                id: Xid(event.event),
                abs: Point::new(event.root_x as i32, event.root_y as i32),
            }))),

            Event::MotionNotify(event) => Ok(Some(XEvent::MotionNotify(MotionEvent {
                id: Xid(event.event),
                abs: Point::new(event.root_x as i32, event.root_y as i32),
                held: held_buttons(event.state),
            }))),

            Event::EnterNotify(event) => Ok(Some(XEvent::Enter(PointerChange {
                id: Xid(event.event),
                abs: Point::new(event.root_x as i32, event.root_y as i32),
            }))),

            Event::FocusIn(event) => Ok(Some(XEvent::FocusIn(Xid(event.event)))),

            Event::MapRequest(event) => Ok(Some(XEvent::MapRequest(Xid(event.window)))),

            Event::UnmapNotify(event) => Ok(Some(XEvent::UnmapNotify(Xid(event.window)))),

            Event::ConfigureRequest(event) => {
                Ok(Some(XEvent::ConfigureRequest(ConfigureEvent {
                    id: Xid(event.window),
                    r: Rect::new(
                        event.x as i32,
                        event.y as i32,
                        event.width as u32,
                        event.height as u32,
                    ),
                    is_root: event.window == *self.root,
                })))
            }

            Event::ClientMessage(event) => {
                if event.format != 32 {
                    trace!(format = event.format, "dropping client message");
                    return Ok(None);
                }

                Ok(Some(XEvent::ClientMessage(ClientMessage::new(
                    Xid(event.window),
                    self.atom_name(event.type_)?,
                    event.data.as_data32(),
                ))))
            }

            // Map known error codes that we know how to handle into crate Errors
            Event::Error(X11Error {
                error_kind: ErrorKind::Window,
                bad_value,
                ..
            }) => Err(Error::UnknownClient(Xid(bad_value))),

            // Other errors are returned directly
            Event::Error(e) => Err(Error::X11Error(e)),

            // Ignoring other event types
            _ => Ok(None),
        }
    }
}

fn held_buttons(state: KeyButMask) -> HeldButtons {
    let mut held = HeldButtons::empty();
    let raw = u16::from(state);

    if raw & u16::from(KeyButMask::BUTTON1) != 0 {
        held |= HeldButtons::LEFT;
    }
    if raw & u16::from(KeyButMask::BUTTON3) != 0 {
        held |= HeldButtons::RIGHT;
    }

    held
}

impl<C: Connection> XConn for Conn<C> {
    fn root(&self) -> Xid {
        self.root
    }

    fn screen_size(&self) -> Rect {
        self.screen
    }

    fn next_event(&self) -> Result<XEvent> {
        loop {
            let stashed = self.pending.borrow_mut().take();
            let event = match stashed {
                Some(event) => event,
                None => self.conn.wait_for_event()?,
            };

            let event = match event {
                Event::MotionNotify(m) => Event::MotionNotify(self.coalesce_motion(m)?),
                other => other,
            };

            if let Some(converted) = self.convert_event(event)? {
                return Ok(converted);
            }
        }
    }

    fn flush(&self) {
        let _ = self.conn.flush();
    }

    fn become_window_manager(&self) -> Result<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY;
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);

        match self.conn.change_window_attributes(*self.root, &aux)?.check() {
            Err(ReplyError::X11Error(X11Error {
                error_kind: ErrorKind::Access,
                ..
            })) => Err(Error::WindowManagerDetected),
            Err(e) => Err(e.into()),
            Ok(()) => Ok(()),
        }
    }

    fn grab_server(&self) -> Result<()> {
        self.conn.grab_server()?;

        Ok(())
    }

    fn ungrab_server(&self) -> Result<()> {
        self.conn.ungrab_server()?;

        Ok(())
    }

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        let reply = self.conn.query_tree(*self.root)?.reply()?;

        Ok(reply.children.into_iter().map(Xid).collect())
    }

    fn window_attributes(&self, client: Xid) -> Result<WindowAttributes> {
        let reply = self.conn.get_window_attributes(*client)?.reply()?;

        Ok(WindowAttributes {
            override_redirect: reply.override_redirect,
            viewable: reply.map_state == MapState::VIEWABLE,
        })
    }

    fn window_geometry(&self, client: Xid) -> Result<Rect> {
        let geo = self.conn.get_geometry(*client)?.reply()?;

        Ok(Rect::new(
            geo.x as i32,
            geo.y as i32,
            geo.width as u32,
            geo.height as u32,
        ))
    }

    fn window_types(&self, client: Xid) -> Result<Vec<Atom>> {
        let reply = self
            .conn
            .get_property(
                false,
                *client,
                self.known_atom(Atom::NetWmWindowType),
                AtomEnum::ATOM,
                0,
                32,
            )?
            .reply()?;

        let types = reply
            .value32()
            .map(|vals| vals.filter_map(|raw| self.atoms.name_of(raw)).collect())
            .unwrap_or_default();

        Ok(types)
    }

    fn position_window(&self, client: Xid, r: Rect) -> Result<()> {
        let aux = ConfigureWindowAux::new()
            .x(r.x)
            .y(r.y)
            .width(r.w)
            .height(r.h);
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn move_window(&self, client: Xid, p: Point) -> Result<()> {
        let aux = ConfigureWindowAux::new().x(p.x).y(p.y);
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn resize_window(&self, client: Xid, w: u32, h: u32) -> Result<()> {
        let aux = ConfigureWindowAux::new().width(w).height(h);
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn map_window(&self, client: Xid) -> Result<()> {
        self.conn.map_window(*client)?;

        Ok(())
    }

    fn raise_window(&self, client: Xid) -> Result<()> {
        let aux = ConfigureWindowAux::new().stack_mode(StackMode::ABOVE);
        self.conn.configure_window(*client, &aux)?;

        Ok(())
    }

    fn set_window_decorations(&self, client: Xid, border: u32, color: u32, bg: u32) -> Result<()> {
        let aux = ConfigureWindowAux::new().border_width(border);
        self.conn.configure_window(*client, &aux)?;

        let aux = ChangeWindowAttributesAux::new()
            .border_pixel(color)
            .background_pixel(bg);
        self.conn.change_window_attributes(*client, &aux)?;

        Ok(())
    }

    fn select_client_events(&self, client: Xid) -> Result<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::SUBSTRUCTURE_NOTIFY
            | EventMask::ENTER_WINDOW;
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);
        self.conn.change_window_attributes(*client, &aux)?;

        Ok(())
    }

    fn grab_drag_buttons(&self, client: Xid) -> Result<()> {
        let mask = EventMask::BUTTON_PRESS | EventMask::BUTTON_MOTION;

        for button in [ButtonIndex::M1, ButtonIndex::M3] {
            self.conn.grab_button(
                false, // don't pass grabbed events through to the client
                *client,
                mask,
                GrabMode::ASYNC, // don't lock the pointer input while grabbing
                GrabMode::ASYNC, // don't lock the keyboard input while grabbing
                NONE,            // don't confine the cursor to a specific window
                NONE,            // don't change the cursor type
                button,
                DRAG_MODIFIER,
            )?;
        }

        Ok(())
    }

    fn focus_window(&self, client: Xid) -> Result<()> {
        self.conn
            .set_input_focus(InputFocus::PARENT, *client, CURRENT_TIME)?;

        Ok(())
    }

    fn focus_root(&self) -> Result<()> {
        self.conn
            .set_input_focus(InputFocus::POINTER_ROOT, *self.root, CURRENT_TIME)?;

        Ok(())
    }

    fn init_wm_properties(&self, wm_name: &str) -> Result<()> {
        let check = self.known_atom(Atom::NetSupportingWmCheck);
        let name = self.known_atom(Atom::NetWmName);
        let utf8 = self.known_atom(Atom::UTF8String);

        for &win in [self.check_win, self.root].iter() {
            self.conn.change_property32(
                PropMode::REPLACE,
                *win,
                check,
                AtomEnum::WINDOW,
                &[*self.check_win],
            )?;
            self.conn
                .change_property8(PropMode::REPLACE, *win, name, utf8, wm_name.as_bytes())?;
        }

        let supported: Vec<u32> = EWMH_SUPPORTED_ATOMS
            .iter()
            .map(|&atom| self.known_atom(atom))
            .collect();
        self.conn.change_property32(
            PropMode::REPLACE,
            *self.root,
            self.known_atom(Atom::NetSupported),
            AtomEnum::ATOM,
            &supported,
        )?;

        self.conn.change_property32(
            PropMode::REPLACE,
            *self.root,
            self.known_atom(Atom::NetNumberOfDesktops),
            AtomEnum::CARDINAL,
            &[WORKSPACES as u32],
        )?;
        self.set_current_workspace(Workspace::Center)?;

        Ok(())
    }

    fn set_active_window(&self, client: Xid) -> Result<()> {
        self.conn.change_property32(
            PropMode::REPLACE,
            *self.root,
            self.known_atom(Atom::NetActiveWindow),
            AtomEnum::WINDOW,
            &[*client],
        )?;

        Ok(())
    }

    fn clear_active_window(&self) -> Result<()> {
        self.conn
            .delete_property(*self.root, self.known_atom(Atom::NetActiveWindow))?;

        Ok(())
    }

    fn set_current_workspace(&self, ws: Workspace) -> Result<()> {
        self.conn.change_property32(
            PropMode::REPLACE,
            *self.root,
            self.known_atom(Atom::NetCurrentDesktop),
            AtomEnum::CARDINAL,
            &[ws.index() as u32],
        )?;

        Ok(())
    }

    fn send_delete(&self, client: Xid) -> Result<()> {
        let data = [
            self.known_atom(Atom::WmDeleteWindow),
            CURRENT_TIME,
            0,
            0,
            0,
        ];
        let event = ClientMessageEvent::new(32, *client, self.known_atom(Atom::WmProtocols), data);
        self.conn
            .send_event(false, *client, EventMask::NO_EVENT, event)?;

        Ok(())
    }
}
