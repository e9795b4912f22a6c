//! The cardinal window manager.
//!
//! Runtime control happens over the `WM_REQUEST` client message channel: see
//! the companion `cardinalc` binary. Log verbosity is taken from RUST_LOG.
use cardinal::{core::WindowManager, x11rb::RustConn, Result};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .finish()
        .init();

    let conn = RustConn::new()?;
    let wm = WindowManager::new(conn)?;

    wm.run()
}
