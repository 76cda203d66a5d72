//! crates/probelog/src/macros.rs
//! Logging macros backed by the process-wide logger.

/// Writes a timestamped informational message through the process-wide
/// logger.
///
/// # Examples
///
/// ```
/// probelog::log_info!("tracer started, {} probes attached", 12);
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::global::info(::core::format_args!($($arg)+))
    };
}

/// Writes an error message through the process-wide logger and applies the
/// termination policy.
///
/// The function name is the calling module path and the line is the call
/// site. Evaluates to the call's [`Outcome`](crate::Outcome).
///
/// # Examples
///
/// ```
/// use probelog::{Outcome, TerminationPolicy};
///
/// let outcome = probelog::log_error!(TerminationPolicy::EMPTY, "map {} missing", "conn_table");
/// assert_eq!(outcome, Outcome::Continue);
/// ```
#[macro_export]
macro_rules! log_error {
    ($policy:expr, $($arg:tt)+) => {
        $crate::global::error(
            $policy,
            ::core::module_path!(),
            ::core::line!(),
            ::core::format_args!($($arg)+),
        )
    };
}

/// Like [`log_error!`](crate::log_error), with an explicit function name and line.
///
/// Pass `""` and `0` to omit the location prefix.
///
/// # Examples
///
/// ```
/// use probelog::TerminationPolicy;
///
/// probelog::log_error_at!(TerminationPolicy::EMPTY, "connect", 42, "timeout after {} ms", 500);
/// ```
#[macro_export]
macro_rules! log_error_at {
    ($policy:expr, $function:expr, $line:expr, $($arg:tt)+) => {
        $crate::global::error(
            $policy,
            $function,
            $line,
            ::core::format_args!($($arg)+),
        )
    };
}
