//! Execution context for a compiled PHP virtual machine.
//!
//! The [`runtime::context::Context`] owns the frame stack, the function and
//! class tables and the constant table that compiled code consults at run
//! time. Frames are opaque to the context: it only stores them and hands
//! ownership back on `pop`/`restore`.

pub mod compiler;
pub mod core;
pub mod runtime;
pub mod vm;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=php_vm=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the embedder.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
