//! The command channel between cardinalc and a running window manager.
//!
//! Commands travel as `ClientMessage` events on the root window with a
//! message type of `WM_REQUEST` and format 32: `data[0]` is the opcode and
//! `data[1..]` holds any arguments. The opcodes are a stable numeric
//! contract between the two binaries.
use crate::pure::workspace::Direction;

/// A control request for the running window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Move the focused client to the workspace in the given direction
    Move(Direction),
    /// Switch the current workspace in the given direction
    Go(Direction),
    /// Toggle fullscreen on the focused client
    Zoom,
    /// Ask the focused client to close itself
    Kill,
    /// Shut the window manager down cleanly
    Exit,
    /// Focus the next client on the current workspace
    FocusNext,
    /// Focus the previous client on the current workspace
    FocusPrev,
}

impl Request {
    /// Decode a request from client message data, bounds-checking the opcode
    /// and any arguments. Unknown opcodes and invalid arguments decode to
    /// `None` and are ignored by the dispatcher.
    pub fn decode(data: &[u32; 5]) -> Option<Self> {
        let direction = Direction::try_from(data[1]).ok();

        match data[0] {
            0 => Some(Request::Move(direction?)),
            1 => Some(Request::Go(direction?)),
            2 => Some(Request::Zoom),
            3 => Some(Request::Kill),
            4 => Some(Request::Exit),
            5 => Some(Request::FocusNext),
            6 => Some(Request::FocusPrev),
            _ => None,
        }
    }

    /// Encode this request as client message data for sending.
    pub fn encode(&self) -> [u32; 5] {
        match *self {
            Request::Move(direction) => [0, direction as u32, 0, 0, 0],
            Request::Go(direction) => [1, direction as u32, 0, 0, 0],
            Request::Zoom => [2, 0, 0, 0, 0],
            Request::Kill => [3, 0, 0, 0, 0],
            Request::Exit => [4, 0, 0, 0, 0],
            Request::FocusNext => [5, 0, 0, 0, 0],
            Request::FocusPrev => [6, 0, 0, 0, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case([0, 3, 0, 0, 0], Some(Request::Move(Direction::Down)); "move down")]
    #[test_case([1, 0, 0, 0, 0], Some(Request::Go(Direction::Left)); "go left")]
    #[test_case([1, 4, 0, 0, 0], None; "go with invalid direction")]
    #[test_case([4, 0, 0, 0, 0], Some(Request::Exit); "exit")]
    #[test_case([6, 0, 0, 0, 0], Some(Request::FocusPrev); "focus prev")]
    #[test_case([7, 0, 0, 0, 0], None; "opcode out of range")]
    #[test_case([u32::MAX, 0, 0, 0, 0], None; "opcode far out of range")]
    #[test]
    fn decode(data: [u32; 5], expected: Option<Request>) {
        assert_eq!(Request::decode(&data), expected);
    }

    #[test_case(Request::Move(Direction::Up); "move up")]
    #[test_case(Request::Go(Direction::Right); "go right")]
    #[test_case(Request::Kill; "kill")]
    #[test]
    fn encoded_requests_decode_to_themselves(request: Request) {
        assert_eq!(Request::decode(&request.encode()), Some(request));
    }
}
