//! Laws over the pure state layer that the rest of the manager relies on.
use cardinal::{
    pure::{Client, ClientTable, Direction, Rect, Workspace},
    Xid,
};
use quickcheck_macros::quickcheck;
use simple_test_case::test_case;
use strum::IntoEnumIterator;

use Direction::*;
use Workspace::*;

// The workspace transition table, cell for cell. The compass behaves as a
// torus with Center at the cross, which is why North goes South when moving
// Up and vice versa.
#[test_case(Center, Left, West; "center left")]
#[test_case(Center, Right, East; "center right")]
#[test_case(Center, Up, North; "center up")]
#[test_case(Center, Down, South; "center down")]
#[test_case(West, Left, East; "west left")]
#[test_case(West, Right, Center; "west right")]
#[test_case(West, Up, North; "west up")]
#[test_case(West, Down, South; "west down")]
#[test_case(East, Left, Center; "east left")]
#[test_case(East, Right, West; "east right")]
#[test_case(East, Up, North; "east up")]
#[test_case(East, Down, South; "east down")]
#[test_case(North, Left, West; "north left")]
#[test_case(North, Right, East; "north right")]
#[test_case(North, Up, South; "north up")]
#[test_case(North, Down, Center; "north down")]
#[test_case(South, Left, West; "south left")]
#[test_case(South, Right, East; "south right")]
#[test_case(South, Up, Center; "south up")]
#[test_case(South, Down, North; "south down")]
#[test]
fn transition_table(from: Workspace, direction: Direction, to: Workspace) {
    assert_eq!(from.in_direction(direction), to);
}

// Going toward Center and then back out returns to where you started, for
// every non-Center workspace.
#[test_case(West, Right; "from west")]
#[test_case(East, Left; "from east")]
#[test_case(North, Down; "from north")]
#[test_case(South, Up; "from south")]
#[test]
fn workspace_toggle_symmetry(start: Workspace, toward_center: Direction) {
    let opposite = match toward_center {
        Left => Right,
        Right => Left,
        Up => Down,
        Down => Up,
    };

    assert_eq!(start.in_direction(toward_center), Center);
    assert_eq!(Center.in_direction(opposite), start);
}

#[quickcheck]
fn transitions_never_stay_put(ws: u8, direction: u8) -> bool {
    let ws = Workspace::iter().nth(ws as usize % 5).unwrap();
    let direction = Direction::iter().nth(direction as usize % 4).unwrap();

    ws.in_direction(direction) != ws
}

#[test]
fn every_workspace_is_one_step_from_center() {
    for ws in Workspace::iter().filter(|&ws| ws != Center) {
        assert!(Direction::iter().any(|d| ws.in_direction(d) == Center));
    }
}

fn single_workspace_table(n: u32) -> ClientTable {
    let mut table = ClientTable::new();
    for id in 1..=n {
        table.insert(Client::new(
            Xid::from(id),
            Center,
            Rect::new(0, 0, 100, 100),
        ));
    }

    table
}

#[test]
fn cycling_forward_visits_every_client_and_wraps() {
    let table = single_workspace_table(5);

    let mut seen = vec![];
    let mut current = Xid::from(1u32);
    for _ in 0..5 {
        current = table.next_on(current, Center).unwrap();
        seen.push(u32::from(current));
    }

    assert_eq!(seen, vec![2, 3, 4, 5, 1]);
}

#[quickcheck]
fn next_then_prev_returns_to_the_anchor(n: u32, anchor: u32) -> bool {
    let n = n % 20 + 1;
    let anchor = Xid::from(anchor % n + 1);
    let table = single_workspace_table(n);

    let there = table.next_on(anchor, Center).unwrap();

    table.prev_on(there, Center) == Some(anchor)
}

#[test]
fn last_on_ignores_other_workspaces() {
    let mut table = single_workspace_table(3);
    table.insert(Client::new(Xid::from(10u32), West, Rect::new(0, 0, 50, 50)));

    assert_eq!(table.last_on(Center), Some(Xid::from(3u32)));
    assert_eq!(table.last_on(West), Some(Xid::from(10u32)));
    assert_eq!(table.last_on(North), None);
}
