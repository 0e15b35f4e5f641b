//! Process-wide library lifecycle.
//!
//! RAPP holds exactly one piece of mutable process-wide state: whether
//! the library has been [`initialize`]d, and the alignment that was
//! detected at that time. Every other compute function is a pure
//! function of its arguments (see the crate-level concurrency notes).
//!
//! `initialize`/`terminate` are themselves **not** safe to call
//! concurrently with each other; a single bootstrap thread is expected
//! to own the pairing. We implement the flag with an [`AtomicBool`]
//! purely so that compute calls on worker threads observe the state
//! without undefined behaviour, not to make init/terminate racy-safe
//! against each other.

use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize process-wide library state. Idempotent: calling it again
/// while already initialized is a no-op.
///
/// Must be called before any other compute or allocation call.
pub fn initialize() {
    if !INITIALIZED.swap(true, Ordering::SeqCst) {
        log::debug!(
            "rapp initialized (alignment = {} bytes)",
            crate::alloc::ALIGNMENT
        );
    }
}

/// Release process-wide library state. Idempotent: calling it again
/// while already terminated is a no-op.
///
/// After this call, compute functions fail with
/// [`crate::error::RappError::NotInitialized`] until [`initialize`] is
/// called again.
pub fn terminate() {
    if INITIALIZED.swap(false, Ordering::SeqCst) {
        log::debug!("rapp terminated");
    }
}

/// Returns whether the library is currently initialized.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Prologue helper: the first check in every compute entry point.
pub(crate) fn check_initialized() -> crate::error::RappResult {
    if is_initialized() {
        Ok(())
    } else {
        Err(crate::error::RappError::NotInitialized)
    }
}
