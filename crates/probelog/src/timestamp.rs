//! crates/probelog/src/timestamp.rs
//! Wall-clock prefix for info messages.

use std::fmt;

use time::{OffsetDateTime, UtcOffset};

/// Calendar date and time of day as printed at the start of an info message.
///
/// Renders as `YYYY-MM-DD H:M:S`: month and day are zero-padded to two
/// digits, hour, minute and second are not. The asymmetry matches the log
/// format existing tooling already parses.
///
/// # Examples
///
/// ```
/// use probelog::Timestamp;
///
/// let timestamp = Timestamp::new(2024, 3, 5, 9, 4, 2);
/// assert_eq!(timestamp.to_string(), "2024-03-05 9:4:2");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Timestamp {
    /// Builds a timestamp from its fields. Values are printed as given.
    #[must_use]
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Captures the calendar fields of `moment` in its own offset.
    #[must_use]
    pub fn from_date_time(moment: OffsetDateTime) -> Self {
        Self::new(
            moment.year(),
            u8::from(moment.month()),
            moment.day(),
            moment.hour(),
            moment.minute(),
            moment.second(),
        )
    }

    /// Year, unpadded.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month of the year, `1..=12`.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Hour of the day.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of the hour.
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second of the minute.
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(moment: OffsetDateTime) -> Self {
        Self::from_date_time(moment)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {}:{}:{}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Source of local wall-clock time with a UTC offset fixed at construction.
///
/// [`LocalClock::detect`] resolves the local offset once and every later
/// reading reuses it. A host that changes time zones at runtime builds a new
/// clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocalClock {
    offset: UtcOffset,
}

impl LocalClock {
    /// Resolves the current local offset, falling back to UTC when the
    /// platform cannot determine it.
    #[must_use]
    pub fn detect() -> Self {
        Self::fixed(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    /// Uses `offset` for every reading.
    #[must_use]
    pub const fn fixed(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// A clock that reports UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self::fixed(UtcOffset::UTC)
    }

    /// Returns the offset applied to readings.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Reads the current time in the clock's offset.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        Timestamp::from_date_time(OffsetDateTime::now_utc().to_offset(self.offset))
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::detect()
    }
}
