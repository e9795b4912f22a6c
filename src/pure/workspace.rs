//! The five workspace compass and the directional transitions between its
//! points.
use strum::{Display, EnumIter, EnumString};

/// The number of virtual workspaces.
pub const WORKSPACES: usize = 5;

/// A virtual workspace, named for its position on the compass.
///
/// Discriminant values are the desktop indices published via
/// `_NET_CURRENT_DESKTOP` and must not be reordered.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Workspace {
    /// The workspace shown at startup
    Center,
    /// Left of center
    West,
    /// Right of center
    East,
    /// Above center
    North,
    /// Below center
    South,
}

/// A direction of travel between workspaces.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Toward the west
    Left,
    /// Toward the east
    Right,
    /// Toward the north
    Up,
    /// Toward the south
    Down,
}

impl TryFrom<u32> for Direction {
    type Error = u32;

    fn try_from(raw: u32) -> std::result::Result<Self, u32> {
        match raw {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Up),
            3 => Ok(Direction::Down),
            _ => Err(raw),
        }
    }
}

use Workspace::*;

// The compass behaves as a torus with Center at the cross: note the
// asymmetric North/Up and South/Down entries.
const TRANSITIONS: [[Workspace; 4]; WORKSPACES] = [
    // Left    Right   Up      Down
    [West, East, North, South],   // Center
    [East, Center, North, South], // West
    [Center, West, North, South], // East
    [West, East, South, Center],  // North
    [West, East, Center, North],  // South
];

impl Workspace {
    /// The workspace reached by moving in the given direction from here.
    pub fn in_direction(self, direction: Direction) -> Workspace {
        TRANSITIONS[self as usize][direction as usize]
    }

    /// The desktop index for this workspace as published to the X server.
    pub fn index(self) -> usize {
        self as usize
    }

    /// A three line rendering of the compass with this workspace marked.
    pub fn ascii_art(self) -> String {
        let p = |ws: Workspace| if ws == self { "[*]" } else { "[ ]" };

        format!(
            "    {}\n{} {} {}\n    {}",
            p(North),
            p(West),
            p(Center),
            p(East),
            p(South)
        )
    }
}
