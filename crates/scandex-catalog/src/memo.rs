// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compute-once cells for values derived from scan content.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

/// A lazily filled slot whose initialiser runs at most once successfully.
///
/// Concurrent callers block on the initialiser instead of racing it, so an
/// OCR run is never started twice for the same scan. A failed initialiser
/// leaves the slot empty and the next caller tries again.
pub struct Memo<T> {
    value: OnceLock<T>,
    init: Mutex<()>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The cached value, if one has been computed.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        // Poisoning only means another initialiser panicked; the slot is still empty.
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.value.get_or_init(|| value))
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<pending>)"),
        }
    }
}
