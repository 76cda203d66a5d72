//! crates/probelog/src/global.rs
//! Process-wide logger used by the logging macros.
//!
//! The host builds a [`Logger`] during startup and publishes it once with
//! [`install`]. Until then, and in processes that never install one, the
//! macros go through a silent logger: messages are discarded but termination
//! policies still abort or exit.

use std::fmt;
use std::sync::{LazyLock, OnceLock};

use crate::hooks::ProcessHooks;
use crate::logger::Logger;
use crate::policy::TerminationPolicy;
use crate::termination::Outcome;

/// Type of the process-wide logger.
pub type GlobalLogger = Logger<'static, Box<dyn ProcessHooks>>;

static LOGGER: OnceLock<GlobalLogger> = OnceLock::new();

static FALLBACK: LazyLock<GlobalLogger> = LazyLock::new(|| boxed(Logger::silent()));

fn boxed<H: ProcessHooks + 'static>(logger: Logger<'static, H>) -> GlobalLogger {
    logger.map_hooks(|hooks| Box::new(hooks) as Box<dyn ProcessHooks>)
}

/// Returned by [`install`] when a process-wide logger is already set.
#[derive(thiserror::Error)]
#[error("a process-wide logger is already installed")]
pub struct AlreadyInstalled {
    rejected: GlobalLogger,
}

impl AlreadyInstalled {
    /// Returns the logger that was not installed.
    #[must_use]
    pub fn into_logger(self) -> GlobalLogger {
        self.rejected
    }
}

impl fmt::Debug for AlreadyInstalled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlreadyInstalled")
            .field("rejected", &self.rejected)
            .finish()
    }
}

/// Publishes `logger` as the process-wide logger.
///
/// Only the first call succeeds. Later calls hand their logger back inside
/// [`AlreadyInstalled`].
///
/// # Errors
///
/// Returns [`AlreadyInstalled`] when a logger has already been installed.
///
/// # Examples
///
/// ```
/// use probelog::{Logger, install, installed};
/// use probelog_sink::Destinations;
///
/// install(Logger::new(Destinations::stdout_only())).expect("first install");
/// assert!(installed());
/// assert!(install(Logger::silent()).is_err());
/// ```
pub fn install<H: ProcessHooks + 'static>(
    logger: Logger<'static, H>,
) -> Result<(), AlreadyInstalled> {
    LOGGER
        .set(boxed(logger))
        .map_err(|rejected| AlreadyInstalled { rejected })
}

/// Reports whether [`install`] has succeeded.
#[must_use]
pub fn installed() -> bool {
    LOGGER.get().is_some()
}

/// Returns the installed logger, or the silent fallback.
#[must_use]
pub fn logger() -> &'static GlobalLogger {
    LOGGER.get().unwrap_or_else(|| &*FALLBACK)
}

/// Info entry point used by [`log_info!`](crate::log_info).
pub fn info(args: fmt::Arguments<'_>) {
    logger().info(args);
}

/// Error entry point used by [`log_error!`](crate::log_error) and
/// [`log_error_at!`](crate::log_error_at).
pub fn error(
    policy: TerminationPolicy,
    function: &str,
    line: u32,
    args: fmt::Arguments<'_>,
) -> Outcome {
    logger().error(policy, function, line, args)
}
