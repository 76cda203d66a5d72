//! crates/probelog/src/termination.rs
//! Termination controller for the error path.

use crate::hooks::ProcessHooks;
use crate::policy::TerminationPolicy;

/// Final state of an error-log call.
///
/// `Formatted -> Dispatched -> {Continue | Trapped | Exited}`. With the
/// default hooks the terminal states never return to the caller, so a caller
/// only observes them when its hooks return.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// No termination was requested.
    Continue,
    /// The abort hook ran.
    Trapped,
    /// The exit hook ran with status `1`.
    Exited,
}

impl Outcome {
    /// Reports whether a termination hook ran.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Exit status passed to [`ProcessHooks::exit`] for fatal errors.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Applies `policy` after the message has been dispatched.
///
/// [`ABORT`](TerminationPolicy::ABORT) takes precedence: when it is set the
/// exit hook is not consulted even if [`FATAL`](TerminationPolicy::FATAL) is
/// set as well.
pub fn handle_termination<H: ProcessHooks + ?Sized>(
    policy: TerminationPolicy,
    hooks: &H,
) -> Outcome {
    if policy.aborts() {
        hooks.abort();
        Outcome::Trapped
    } else if policy.exits() {
        hooks.exit(FATAL_EXIT_CODE);
        Outcome::Exited
    } else {
        Outcome::Continue
    }
}
