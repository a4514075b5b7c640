//! Interrupt handling for long runs.
//!
//! The first SIGINT/SIGTERM marks the run cancelled; the add loop finishes
//! the utility in progress and starts no new one. A second signal exits
//! immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Route SIGINT/SIGTERM to this flag. Call once at startup.
    pub fn install_signal_handler(&self) -> Result<()> {
        let cancelled = Arc::clone(&self.cancelled);
        ctrlc::set_handler(move || {
            if cancelled.swap(true, Ordering::SeqCst) {
                eprintln!("\nReceived second interrupt, exiting immediately...");
                std::process::exit(EXIT_INTERRUPTED);
            }
            eprintln!("\nReceived interrupt, stopping after the current utility...");
        })
        .map_err(|e| Error::internal_unexpected(format!("install signal handler: {}", e)))
    }
}
