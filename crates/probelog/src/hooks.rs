//! crates/probelog/src/hooks.rs
//! Replaceable process abort and exit primitives.

use std::sync::Arc;

/// Process-level primitives the termination controller calls.
///
/// The defaults ([`DefaultHooks`]) abort or exit the process. Hosts replace
/// them to trap into a debugger, flush their own state first, or record the
/// request in tests. Implementations are allowed to return; the controller
/// then hands control back to the caller of the error path.
pub trait ProcessHooks: Send + Sync {
    /// Invoked for [`TerminationPolicy::ABORT`](crate::TerminationPolicy::ABORT).
    fn abort(&self);

    /// Invoked for [`TerminationPolicy::FATAL`](crate::TerminationPolicy::FATAL)
    /// with status `1`.
    fn exit(&self, code: i32);
}

/// Hooks backed by [`std::process::abort`] and [`std::process::exit`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultHooks;

impl ProcessHooks for DefaultHooks {
    fn abort(&self) {
        std::process::abort()
    }

    fn exit(&self, code: i32) {
        std::process::exit(code)
    }
}

impl<H: ProcessHooks + ?Sized> ProcessHooks for &H {
    fn abort(&self) {
        (**self).abort();
    }

    fn exit(&self, code: i32) {
        (**self).exit(code);
    }
}

impl<H: ProcessHooks + ?Sized> ProcessHooks for Box<H> {
    fn abort(&self) {
        (**self).abort();
    }

    fn exit(&self, code: i32) {
        (**self).exit(code);
    }
}

impl<H: ProcessHooks + ?Sized> ProcessHooks for Arc<H> {
    fn abort(&self) {
        (**self).abort();
    }

    fn exit(&self, code: i32) {
        (**self).exit(code);
    }
}
