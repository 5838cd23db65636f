// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ctrl-C handling.
//
// Outside a guarded section the first Ctrl-C ends the process with the
// user-abort exit code. Inside one (while a work directory exists or an
// external tool rewrites files) it is recorded and turned into
// `ScandexError::UserAbort` at the next checkpoint, so guards and temporary
// directories unwind normally. A second Ctrl-C always ends the process.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use scandex_core::error::{Result, ScandexError};
use tracing::{debug, warn};

/// Process-wide interrupt state fed by [`install`].
pub static INTERRUPT: Interrupt = Interrupt::new();

#[derive(Debug)]
pub struct Interrupt {
    requested: AtomicBool,
    guards: AtomicUsize,
}

impl Interrupt {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            guards: AtomicUsize::new(0),
        }
    }

    /// Record a Ctrl-C. Returns `true` when a guarded section will pick it
    /// up at its next checkpoint, `false` when the process should end now.
    pub fn request(&self) -> bool {
        let repeated = self.requested.swap(true, Ordering::SeqCst);
        !repeated && self.guards.load(Ordering::SeqCst) > 0
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// `UserAbort` once Ctrl-C was pressed.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_requested() {
            return Err(ScandexError::UserAbort);
        }
        Ok(())
    }

    /// External tools share the terminal and die from the same Ctrl-C; their
    /// failure is reported as the abort.
    pub fn or_abort(&self, err: ScandexError) -> ScandexError {
        if self.is_requested() {
            debug!(error = %err, "Failure after Ctrl-C");
            ScandexError::UserAbort
        } else {
            err
        }
    }

    /// Defer Ctrl-C to checkpoints until the guard is dropped.
    pub fn guard(&self) -> Guard<'_> {
        self.guards.fetch_add(1, Ordering::SeqCst);
        Guard { interrupt: self }
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "Ctrl-C is deferred only while the guard lives"]
#[derive(Debug)]
pub struct Guard<'a> {
    interrupt: &'a Interrupt,
}

impl Drop for Guard<'_> {
    fn drop(&mut self) {
        self.interrupt.guards.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Listen for Ctrl-C on a background thread for the rest of the process.
/// `abort` runs when the process has to end immediately.
pub fn install(abort: fn()) {
    let spawned = thread::Builder::new()
        .name("scandex-interrupt".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    warn!(%err, "Cannot listen for Ctrl-C");
                    return;
                }
            };
            runtime.block_on(async {
                loop {
                    if let Err(err) = tokio::signal::ctrl_c().await {
                        warn!(%err, "Cannot listen for Ctrl-C");
                        return;
                    }
                    if INTERRUPT.request() {
                        debug!("Ctrl-C deferred to the next checkpoint");
                    } else {
                        abort();
                    }
                }
            });
        });
    if let Err(err) = spawned {
        warn!(%err, "Cannot listen for Ctrl-C");
    }
}
