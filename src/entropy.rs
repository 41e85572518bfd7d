//! Entropy estimation and crack-time bucketing.

use serde::Serialize;
use std::fmt;

/// Assumed adversary guess rate for the offline-attack estimate.
pub const GUESSES_PER_SECOND: f64 = 1e9;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;
const MILLENNIUM: f64 = 31_536_000_000.0;

/// Theoretical maximum entropy in bits: `length * log2(charset_size)`.
///
/// This is a coarse upper bound, not an attack-aware estimate; prefer an
/// advanced backend's guess count when one is available.
pub fn entropy_bits(length: usize, charset_size: u32) -> f64 {
    if charset_size == 0 {
        return 0.0;
    }
    length as f64 * (charset_size as f64).log2()
}

/// Human time band for an estimated crack duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CrackTime {
    Instant,
    Seconds(f64),
    Minutes(f64),
    Hours(f64),
    Days(f64),
    Years(f64),
    MillionsOfYears,
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackTime::Instant => write!(f, "Instantly"),
            CrackTime::Seconds(s) => write!(f, "{s:.1} seconds"),
            CrackTime::Minutes(m) => write!(f, "{m:.1} minutes"),
            CrackTime::Hours(h) => write!(f, "{h:.1} hours"),
            CrackTime::Days(d) => write!(f, "{d:.1} days"),
            CrackTime::Years(y) => write!(f, "{y:.1} years"),
            CrackTime::MillionsOfYears => write!(f, "Millions of years"),
        }
    }
}

/// Buckets the average-case time to exhaust `2^entropy` guesses at
/// [`GUESSES_PER_SECOND`].
pub fn estimate_crack_time(entropy_bits: f64) -> CrackTime {
    let combinations = 2f64.powf(entropy_bits);
    let seconds = combinations / (2.0 * GUESSES_PER_SECOND);

    if seconds < 1.0 {
        CrackTime::Instant
    } else if seconds < MINUTE {
        CrackTime::Seconds(seconds)
    } else if seconds < HOUR {
        CrackTime::Minutes(seconds / MINUTE)
    } else if seconds < DAY {
        CrackTime::Hours(seconds / HOUR)
    } else if seconds < YEAR {
        CrackTime::Days(seconds / DAY)
    } else if seconds < MILLENNIUM {
        CrackTime::Years(seconds / YEAR)
    } else {
        let years = seconds / YEAR;
        if years > 1e6 {
            CrackTime::MillionsOfYears
        } else {
            CrackTime::Years(years)
        }
    }
}
