//! A mock implementation of XConn that is easier to implement for use in
//! tests. This module and its contents are only available when testing.
use crate::{
    pure::{geometry::Point, geometry::Rect, workspace::Workspace},
    x::{Atom, WindowAttributes, XConn, XEvent},
    Error, Result, Xid,
};

/// Benign defaults are provided for everything other than the event pump so
/// that scenario tests only need to implement the methods whose effects they
/// observe: void operations succeed, queries return an ordinary viewable
/// window with no declared type.
///
/// Any implementation of `MockXConn` will automatically implement [XConn] by
/// forwarding each `$method` to `mock_$method`.
#[allow(unused_variables)]
pub trait MockXConn {
    fn mock_root(&self) -> Xid {
        Xid(0)
    }

    fn mock_screen_size(&self) -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    fn mock_next_event(&self) -> Result<XEvent> {
        Err(Error::UnimplementedMock)
    }

    fn mock_flush(&self) {}

    fn mock_become_window_manager(&self) -> Result<()> {
        Ok(())
    }

    fn mock_grab_server(&self) -> Result<()> {
        Ok(())
    }

    fn mock_ungrab_server(&self) -> Result<()> {
        Ok(())
    }

    fn mock_existing_clients(&self) -> Result<Vec<Xid>> {
        Ok(vec![])
    }

    fn mock_window_attributes(&self, client: Xid) -> Result<WindowAttributes> {
        Ok(WindowAttributes {
            override_redirect: false,
            viewable: true,
        })
    }

    fn mock_window_geometry(&self, client: Xid) -> Result<Rect> {
        Ok(Rect::default())
    }

    fn mock_window_types(&self, client: Xid) -> Result<Vec<Atom>> {
        Ok(vec![])
    }

    fn mock_position_window(&self, client: Xid, r: Rect) -> Result<()> {
        Ok(())
    }

    fn mock_move_window(&self, client: Xid, p: Point) -> Result<()> {
        Ok(())
    }

    fn mock_resize_window(&self, client: Xid, w: u32, h: u32) -> Result<()> {
        Ok(())
    }

    fn mock_map_window(&self, client: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_raise_window(&self, client: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_set_window_decorations(
        &self,
        client: Xid,
        border: u32,
        color: u32,
        bg: u32,
    ) -> Result<()> {
        Ok(())
    }

    fn mock_select_client_events(&self, client: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_grab_drag_buttons(&self, client: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_focus_window(&self, client: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_focus_root(&self) -> Result<()> {
        Ok(())
    }

    fn mock_init_wm_properties(&self, wm_name: &str) -> Result<()> {
        Ok(())
    }

    fn mock_set_active_window(&self, client: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_clear_active_window(&self) -> Result<()> {
        Ok(())
    }

    fn mock_set_current_workspace(&self, ws: Workspace) -> Result<()> {
        Ok(())
    }

    fn mock_send_delete(&self, client: Xid) -> Result<()> {
        Ok(())
    }
}

impl<T> XConn for T
where
    T: MockXConn,
{
    fn root(&self) -> Xid {
        self.mock_root()
    }

    fn screen_size(&self) -> Rect {
        self.mock_screen_size()
    }

    fn next_event(&self) -> Result<XEvent> {
        self.mock_next_event()
    }

    fn flush(&self) {
        self.mock_flush()
    }

    fn become_window_manager(&self) -> Result<()> {
        self.mock_become_window_manager()
    }

    fn grab_server(&self) -> Result<()> {
        self.mock_grab_server()
    }

    fn ungrab_server(&self) -> Result<()> {
        self.mock_ungrab_server()
    }

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        self.mock_existing_clients()
    }

    fn window_attributes(&self, client: Xid) -> Result<WindowAttributes> {
        self.mock_window_attributes(client)
    }

    fn window_geometry(&self, client: Xid) -> Result<Rect> {
        self.mock_window_geometry(client)
    }

    fn window_types(&self, client: Xid) -> Result<Vec<Atom>> {
        self.mock_window_types(client)
    }

    fn position_window(&self, client: Xid, r: Rect) -> Result<()> {
        self.mock_position_window(client, r)
    }

    fn move_window(&self, client: Xid, p: Point) -> Result<()> {
        self.mock_move_window(client, p)
    }

    fn resize_window(&self, client: Xid, w: u32, h: u32) -> Result<()> {
        self.mock_resize_window(client, w, h)
    }

    fn map_window(&self, client: Xid) -> Result<()> {
        self.mock_map_window(client)
    }

    fn raise_window(&self, client: Xid) -> Result<()> {
        self.mock_raise_window(client)
    }

    fn set_window_decorations(&self, client: Xid, border: u32, color: u32, bg: u32) -> Result<()> {
        self.mock_set_window_decorations(client, border, color, bg)
    }

    fn select_client_events(&self, client: Xid) -> Result<()> {
        self.mock_select_client_events(client)
    }

    fn grab_drag_buttons(&self, client: Xid) -> Result<()> {
        self.mock_grab_drag_buttons(client)
    }

    fn focus_window(&self, client: Xid) -> Result<()> {
        self.mock_focus_window(client)
    }

    fn focus_root(&self) -> Result<()> {
        self.mock_focus_root()
    }

    fn init_wm_properties(&self, wm_name: &str) -> Result<()> {
        self.mock_init_wm_properties(wm_name)
    }

    fn set_active_window(&self, client: Xid) -> Result<()> {
        self.mock_set_active_window(client)
    }

    fn clear_active_window(&self) -> Result<()> {
        self.mock_clear_active_window()
    }

    fn set_current_workspace(&self, ws: Workspace) -> Result<()> {
        self.mock_set_current_workspace(ws)
    }

    fn send_delete(&self, client: Xid) -> Result<()> {
        self.mock_send_delete(client)
    }
}
