//! Data types for working with X atoms
use strum::{AsRefStr, EnumIter, EnumString};

/// An internal representation of the X atoms used by the window manager.
///
/// Atom names are shared between all X11 API libraries so this enum gives us
/// a little bit of type safety around their use. The full set is interned
/// eagerly when a connection is established.
#[derive(AsRefStr, EnumString, EnumIter, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Atom {
    /// UTF8_STRING
    #[strum(serialize = "UTF8_STRING")]
    UTF8String,
    /// WM_DELETE_WINDOW
    #[strum(serialize = "WM_DELETE_WINDOW")]
    WmDeleteWindow,
    /// WM_PROTOCOLS
    #[strum(serialize = "WM_PROTOCOLS")]
    WmProtocols,
    /// WM_REQUEST: the private command channel used by cardinalc
    #[strum(serialize = "WM_REQUEST")]
    WmRequest,
    /// _NET_ACTIVE_WINDOW
    #[strum(serialize = "_NET_ACTIVE_WINDOW")]
    NetActiveWindow,
    /// _NET_CURRENT_DESKTOP
    #[strum(serialize = "_NET_CURRENT_DESKTOP")]
    NetCurrentDesktop,
    /// _NET_NUMBER_OF_DESKTOPS
    #[strum(serialize = "_NET_NUMBER_OF_DESKTOPS")]
    NetNumberOfDesktops,
    /// _NET_SUPPORTED
    #[strum(serialize = "_NET_SUPPORTED")]
    NetSupported,
    /// _NET_SUPPORTING_WM_CHECK
    #[strum(serialize = "_NET_SUPPORTING_WM_CHECK")]
    NetSupportingWmCheck,
    /// _NET_WM_NAME
    #[strum(serialize = "_NET_WM_NAME")]
    NetWmName,
    /// _NET_WM_WINDOW_TYPE
    #[strum(serialize = "_NET_WM_WINDOW_TYPE")]
    NetWmWindowType,

    // Window Types
    /// _NET_WM_WINDOW_TYPE_DOCK
    #[strum(serialize = "_NET_WM_WINDOW_TYPE_DOCK")]
    NetWindowTypeDock,
    /// _NET_WM_WINDOW_TYPE_MENU
    #[strum(serialize = "_NET_WM_WINDOW_TYPE_MENU")]
    NetWindowTypeMenu,
    /// _NET_WM_WINDOW_TYPE_TOOLBAR
    #[strum(serialize = "_NET_WM_WINDOW_TYPE_TOOLBAR")]
    NetWindowTypeToolbar,
    /// _NET_WM_WINDOW_TYPE_UTILITY
    #[strum(serialize = "_NET_WM_WINDOW_TYPE_UTILITY")]
    NetWindowTypeUtility,
}

/// The EWMH atoms advertised in `_NET_SUPPORTED` on the root window.
///
/// This is the explicit list of atoms the manager honours, not everything it
/// has interned.
pub const EWMH_SUPPORTED_ATOMS: [Atom; 6] = [
    Atom::NetActiveWindow,
    Atom::NetCurrentDesktop,
    Atom::NetNumberOfDesktops,
    Atom::NetSupported,
    Atom::NetSupportingWmCheck,
    Atom::NetWmName,
];

/// Window types that are left alone entirely: not framed and not tracked.
///
/// Docks are also never framed but are handled separately as they contribute
/// a reserved strip to the usable screen area.
pub const UNMANAGED_WINDOW_TYPES: [Atom; 3] = [
    Atom::NetWindowTypeMenu,
    Atom::NetWindowTypeToolbar,
    Atom::NetWindowTypeUtility,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn atom_names_round_trip() {
        for atom in Atom::iter() {
            assert_eq!(Atom::from_str(atom.as_ref()), Ok(atom));
        }
    }

    #[test]
    fn supported_atoms_are_all_net_prefixed() {
        for atom in EWMH_SUPPORTED_ATOMS.iter() {
            assert!(atom.as_ref().starts_with("_NET_"));
        }
    }
}
