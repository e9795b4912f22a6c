//! Send a control request to a running cardinal instance.
//!
//! Requests are delivered as a `WM_REQUEST` client message on the root
//! window; this program is an ordinary short-lived X client and needs no
//! special privileges.
use cardinal::{core::rpc::Request, pure::Direction, x::Atom, Result};
use std::{env, process::exit, str::FromStr};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ClientMessageEvent, ConnectionExt as _, EventMask},
    wrapper::ConnectionExt as _,
};

const USAGE: &str = "\
usage: cardinalc <command> [direction]

commands:
  move <left|right|up|down>   move the focused window toward a workspace
  go <left|right|up|down>     switch workspace in the given direction
  zoom                        toggle fullscreen on the focused window
  kill                        politely close the focused window
  exit                        stop the window manager
  focusnext                   focus the next window on this workspace
  focusprev                   focus the previous window on this workspace";

fn parse(args: &[String]) -> Option<Request> {
    let direction = |s: &String| Direction::from_str(s).ok();

    match args {
        [verb, d] if verb == "move" => Some(Request::Move(direction(d)?)),
        [verb, d] if verb == "go" => Some(Request::Go(direction(d)?)),
        [verb] if verb == "zoom" => Some(Request::Zoom),
        [verb] if verb == "kill" => Some(Request::Kill),
        [verb] if verb == "exit" => Some(Request::Exit),
        [verb] if verb == "focusnext" => Some(Request::FocusNext),
        [verb] if verb == "focusprev" => Some(Request::FocusPrev),
        _ => None,
    }
}

fn send(request: Request) -> Result<()> {
    let (conn, screen_ix) = x11rb::connect(None)?;
    let root = conn.setup().roots[screen_ix].root;
    let wm_request = conn
        .intern_atom(false, Atom::WmRequest.as_ref().as_bytes())?
        .reply()?
        .atom;

    let event = ClientMessageEvent::new(32, root, wm_request, request.encode());
    conn.send_event(false, root, EventMask::SUBSTRUCTURE_REDIRECT, event)?;
    conn.sync()?;

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "-h") {
        println!("{USAGE}");
        exit(0);
    }

    let request = match parse(&args) {
        Some(request) => request,
        None => {
            eprintln!("{USAGE}");
            exit(1);
        }
    };

    if let Err(error) = send(request) {
        eprintln!("cardinalc: unable to send request: {error}");
        exit(1);
    }
}
