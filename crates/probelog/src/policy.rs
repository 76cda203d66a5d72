//! crates/probelog/src/policy.rs
//! Per-call termination policy flags for the error path.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Bitfield selecting what an error-log call does besides writing the message.
///
/// Flags combine freely with `|`. When both [`ABORT`](Self::ABORT) and
/// [`FATAL`](Self::FATAL) are set, the abort hook runs and the exit hook is
/// not consulted.
///
/// # Examples
///
/// ```
/// use probelog::TerminationPolicy;
///
/// let policy = TerminationPolicy::ERRNO_VALID | TerminationPolicy::FATAL;
/// assert!(policy.errno_valid());
/// assert!(policy.exits());
/// assert!(!policy.aborts());
/// assert_eq!(policy.to_string(), "FATAL | ERRNO_VALID");
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct TerminationPolicy {
    bits: u32,
}

impl TerminationPolicy {
    const fn new(bits: u32) -> Self {
        Self { bits }
    }

    /// Log and continue.
    pub const EMPTY: Self = Self::new(0);
    /// Exit the process with status 1 after the message is written.
    pub const FATAL: Self = Self::new(1 << 0);
    /// Trap into the abort hook after the message is written.
    pub const ABORT: Self = Self::new(1 << 1);
    /// Decorate the message with the current `errno` and its description.
    pub const ERRNO_VALID: Self = Self::new(1 << 16);

    const KNOWN: [(Self, &'static str); 3] = [
        (Self::FATAL, "FATAL"),
        (Self::ABORT, "ABORT"),
        (Self::ERRNO_VALID, "ERRNO_VALID"),
    ];

    const KNOWN_MASK: u32 = Self::FATAL.bits | Self::ABORT.bits | Self::ERRNO_VALID.bits;

    /// Builds a policy from raw bits. Unknown bits are kept but have no effect.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self::new(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns `true` when no flags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks whether all flags in `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns the union of both policies.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::new(self.bits | other.bits)
    }

    /// Reports whether [`ERRNO_VALID`](Self::ERRNO_VALID) is set.
    #[must_use]
    pub const fn errno_valid(self) -> bool {
        self.contains(Self::ERRNO_VALID)
    }

    /// Reports whether [`ABORT`](Self::ABORT) is set.
    #[must_use]
    pub const fn aborts(self) -> bool {
        self.contains(Self::ABORT)
    }

    /// Reports whether [`FATAL`](Self::FATAL) is set.
    #[must_use]
    pub const fn exits(self) -> bool {
        self.contains(Self::FATAL)
    }

    /// Returns the bits outside the defined flags.
    #[must_use]
    pub const fn unknown_bits(self) -> u32 {
        self.bits & !Self::KNOWN_MASK
    }
}

impl fmt::Debug for TerminationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminationPolicy")
            .field("bits", &format_args!("0x{:x}", self.bits))
            .finish()
    }
}

impl fmt::Display for TerminationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("EMPTY");
        }

        let mut first = true;
        for (flag, name) in Self::KNOWN {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                first = false;
                f.write_str(name)?;
            }
        }

        let unknown = self.unknown_bits();
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "unknown(0x{unknown:x})")?;
        }

        Ok(())
    }
}

impl BitOr for TerminationPolicy {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for TerminationPolicy {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAnd for TerminationPolicy {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::new(self.bits & rhs.bits)
    }
}

impl BitAndAssign for TerminationPolicy {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl From<u32> for TerminationPolicy {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<TerminationPolicy> for u32 {
    fn from(policy: TerminationPolicy) -> Self {
        policy.bits
    }
}
