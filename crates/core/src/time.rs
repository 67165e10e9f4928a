use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Time source for swipe timestamps and result records.
///
/// Services take a `Clock` so tests can pin every persisted timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that follows the system time.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Formats a timestamp the way browsers print `Date.toISOString()`
/// (millisecond precision, `Z` suffix).
#[must_use]
pub fn to_iso_string(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 / ISO-8601 timestamp, returning `None` on malformed input.
#[must_use]
pub fn parse_iso(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_string_matches_browser_format() {
        assert_eq!(to_iso_string(fixed_now()), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn parse_iso_accepts_offsets_and_rejects_noise() {
        let parsed = parse_iso("2023-11-14T23:13:20.000+01:00").unwrap();
        assert_eq!(parsed, fixed_now());
        assert!(parse_iso("yesterday").is_none());
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::milliseconds(300));
        assert_eq!(clock.now(), fixed_now() + Duration::milliseconds(300));

        let mut system = Clock::system();
        system.advance(Duration::days(1));
        assert_eq!(system, Clock::System);
    }
}
