//! The table of managed client windows.
use crate::{
    pure::{geometry::Point, geometry::Rect, workspace::Workspace},
    Xid,
};

/// A managed top level application window and its per-manager state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub(crate) id: Xid,
    pub(crate) workspace: Workspace,
    /// The intended on screen geometry.
    pub(crate) geometry: Rect,
    /// The on screen origin recorded before the client was last hidden.
    pub(crate) restore: Point,
    /// The pre-zoom geometry while the client is fullscreen.
    pub(crate) fullscreen: Option<Rect>,
}

impl Client {
    /// Create a new client on the given workspace with the given geometry.
    pub fn new(id: Xid, workspace: Workspace, geometry: Rect) -> Self {
        Self {
            id,
            workspace,
            geometry,
            restore: geometry.origin(),
            fullscreen: None,
        }
    }

    /// The window being managed.
    pub fn id(&self) -> Xid {
        self.id
    }

    /// The workspace this client is a member of.
    pub fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// The client's intended on screen geometry.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// The origin this client will be shown at after being hidden.
    pub fn restore(&self) -> Point {
        self.restore
    }

    /// Whether this client currently occupies the full usable screen area.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }
}

/// An ordered collection of managed [Client]s.
///
/// Order is the insertion order of framing, which is observable through focus
/// cycling, so removal preserves the relative order of the remainder. Lookups
/// are linear scans: the table holds tens of windows at most.
///
/// The focused client is tracked as an [Xid] handle rather than an index or
/// reference so that it can never dangle across table mutations; it is checked
/// against the table contents on every read and cleared when its client is
/// removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientTable {
    clients: Vec<Client>,
    focused: Option<Xid>,
}

impl ClientTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of managed clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether any clients are currently managed.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Whether the given window is in the table.
    pub fn contains(&self, id: Xid) -> bool {
        self.clients.iter().any(|c| c.id == id)
    }

    /// Iterate over the managed clients in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    /// Append a client to the table. Window ids are unique: re-inserting a
    /// managed window is a no-op.
    pub fn insert(&mut self, client: Client) {
        if self.contains(client.id) {
            return;
        }

        self.clients.push(client);
    }

    /// Look up a client by window id.
    pub fn get(&self, id: Xid) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: Xid) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    /// Remove a client by window id, preserving the order of the remainder.
    pub fn remove(&mut self, id: Xid) -> Option<Client> {
        if self.focused == Some(id) {
            self.focused = None;
        }

        let ix = self.clients.iter().position(|c| c.id == id)?;

        Some(self.clients.remove(ix))
    }

    /// The currently focused client, if there is one.
    pub fn focused(&self) -> Option<&Client> {
        self.focused.and_then(|id| self.get(id))
    }

    /// The window id of the currently focused client, if there is one.
    pub fn focused_id(&self) -> Option<Xid> {
        self.focused().map(|c| c.id)
    }

    /// Update the focused client handle. Ids not present in the table are
    /// treated as clearing focus.
    pub fn set_focused(&mut self, id: Option<Xid>) {
        self.focused = id.filter(|&id| self.contains(id));
    }

    /// The last client in insertion order that is a member of the given
    /// workspace.
    pub fn last_on(&self, ws: Workspace) -> Option<Xid> {
        self.clients
            .iter()
            .rev()
            .find(|c| c.workspace == ws)
            .map(|c| c.id)
    }

    /// Window ids of all clients on the given workspace, in insertion order.
    pub fn ids_on(&self, ws: Workspace) -> Vec<Xid> {
        self.clients
            .iter()
            .filter(|c| c.workspace == ws)
            .map(|c| c.id)
            .collect()
    }

    /// Circular traversal from one past the anchor, returning the first
    /// client on the given workspace.
    pub fn next_on(&self, anchor: Xid, ws: Workspace) -> Option<Xid> {
        let ix = self.clients.iter().position(|c| c.id == anchor)?;
        let n = self.clients.len();

        (1..=n)
            .map(|offset| &self.clients[(ix + offset) % n])
            .find(|c| c.workspace == ws)
            .map(|c| c.id)
    }

    /// Circular traversal from one before the anchor, returning the first
    /// client on the given workspace.
    pub fn prev_on(&self, anchor: Xid, ws: Workspace) -> Option<Xid> {
        let ix = self.clients.iter().position(|c| c.id == anchor)?;
        let n = self.clients.len();

        (1..=n)
            .map(|offset| &self.clients[(ix + n - offset) % n])
            .find(|c| c.workspace == ws)
            .map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    fn table(members: &[(u32, Workspace)]) -> ClientTable {
        let mut t = ClientTable::new();
        for &(id, ws) in members {
            t.insert(Client::new(Xid(id), ws, Rect::new(0, 0, 200, 100)));
        }

        t
    }

    use Workspace::*;

    #[test]
    fn insert_is_idempotent_per_id() {
        let mut t = table(&[(1, Center)]);
        t.insert(Client::new(Xid(1), West, Rect::default()));

        assert_eq!(t.len(), 1);
        assert_eq!(t.get(Xid(1)).map(|c| c.workspace()), Some(Center));
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut t = table(&[(1, Center), (2, Center), (3, Center)]);
        t.remove(Xid(2));

        let ids: Vec<Xid> = t.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![Xid(1), Xid(3)]);
    }

    #[test]
    fn removing_the_focused_client_clears_focus() {
        let mut t = table(&[(1, Center), (2, Center)]);
        t.set_focused(Some(Xid(2)));
        t.remove(Xid(2));

        assert_eq!(t.focused_id(), None);
    }

    #[test]
    fn focusing_an_unknown_id_clears_focus() {
        let mut t = table(&[(1, Center)]);
        t.set_focused(Some(Xid(99)));

        assert_eq!(t.focused_id(), None);
    }

    #[test_case(&[(1, Center), (2, West), (3, Center)], Center, Some(3); "skips other workspaces")]
    #[test_case(&[(1, West), (2, West)], Center, None; "none on workspace")]
    #[test_case(&[], Center, None; "empty table")]
    #[test]
    fn last_on_scans_in_reverse(members: &[(u32, Workspace)], ws: Workspace, expected: Option<u32>) {
        assert_eq!(table(members).last_on(ws), expected.map(Xid));
    }

    #[test_case(1, Some(3); "wraps past other workspaces")]
    #[test_case(3, Some(1); "wraps around the end")]
    #[test]
    fn next_on_is_circular(anchor: u32, expected: Option<u32>) {
        let t = table(&[(1, Center), (2, West), (3, Center)]);

        assert_eq!(t.next_on(Xid(anchor), Center), expected.map(Xid));
    }

    #[test_case(1, Some(3); "wraps around the start")]
    #[test_case(3, Some(1); "skips other workspaces")]
    #[test]
    fn prev_on_is_circular(anchor: u32, expected: Option<u32>) {
        let t = table(&[(1, Center), (2, West), (3, Center)]);

        assert_eq!(t.prev_on(Xid(anchor), Center), expected.map(Xid));
    }

    #[test]
    fn cycling_with_a_single_candidate_returns_the_anchor() {
        let t = table(&[(1, Center), (2, West)]);

        assert_eq!(t.next_on(Xid(1), Center), Some(Xid(1)));
        assert_eq!(t.prev_on(Xid(1), Center), Some(Xid(1)));
    }
}
