//! Exact decimal seconds
//!
//! Chapter offsets are accumulated across hundreds of chapters, so they are
//! kept as a signed count of nanoseconds rather than `f64`. Rounding happens
//! only when converting to milliseconds (or centiseconds for display), and
//! always half-to-even.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_CENTI: i64 = 10_000_000;
const FRACTION_DIGITS: usize = 9;

/// A point or span on the playback timeline, in exact decimal seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seconds(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal seconds: '{0}'")]
pub struct ParseSecondsError(String);

impl Seconds {
    pub const ZERO: Seconds = Seconds(0);

    pub const fn from_nanos(nanos: i64) -> Self {
        Seconds(nanos)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Seconds(millis * NANOS_PER_MILLI)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Seconds(secs * NANOS_PER_SECOND)
    }

    /// Convert a tick count in a `num/den` timebase (as used by ffmpeg) to seconds.
    /// Returns None for a zero denominator or on overflow.
    pub fn from_ticks(ticks: i64, num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let scaled = i128::from(ticks)
            .checked_mul(i128::from(num))?
            .checked_mul(i128::from(NANOS_PER_SECOND))?;
        let nanos = round_half_even_i128(scaled, i128::from(den));
        i64::try_from(nanos).ok().map(Seconds)
    }

    pub fn checked_add(self, rhs: Seconds) -> Option<Seconds> {
        self.0.checked_add(rhs.0).map(Seconds)
    }

    pub fn checked_sub(self, rhs: Seconds) -> Option<Seconds> {
        self.0.checked_sub(rhs.0).map(Seconds)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Integer milliseconds, rounded half-to-even
    pub fn to_millis(self) -> i64 {
        round_half_even(self.0, NANOS_PER_MILLI)
    }

    /// `H:MM:SS.ss` for spans of an hour or more, otherwise `M:SS.ss`
    pub fn clock(self) -> String {
        let centis = round_half_even(self.0, NANOS_PER_CENTI);
        let sign = if centis < 0 { "-" } else { "" };
        let centis = centis.unsigned_abs();

        let hours = centis / 360_000;
        let minutes = (centis % 360_000) / 6_000;
        let secs = (centis % 6_000) / 100;
        let frac = centis % 100;

        if hours >= 1 {
            format!("{sign}{hours}:{minutes:02}:{secs:02}.{frac:02}")
        } else {
            format!("{sign}{minutes}:{secs:02}.{frac:02}")
        }
    }
}

fn round_half_even(value: i64, unit: i64) -> i64 {
    let quotient = value.div_euclid(unit);
    let twice_remainder = value.rem_euclid(unit) * 2;
    if twice_remainder > unit || (twice_remainder == unit && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

fn round_half_even_i128(value: i128, unit: i128) -> i128 {
    let (value, unit) = if unit < 0 { (-value, -unit) } else { (value, unit) };
    let quotient = value.div_euclid(unit);
    let twice_remainder = value.rem_euclid(unit) * 2;
    if twice_remainder > unit || (twice_remainder == unit && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

// The operators saturate at the ends of the representable range; use
// `checked_add`/`checked_sub` where overflow has to be detected.
impl Add for Seconds {
    type Output = Seconds;

    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Seconds) {
        *self = *self + rhs;
    }
}

impl Sub for Seconds {
    type Output = Seconds;

    fn sub(self, rhs: Seconds) -> Seconds {
        Seconds(self.0.saturating_sub(rhs.0))
    }
}

impl FromStr for Seconds {
    type Err = ParseSecondsError;

    /// Parse plain decimal text such as `5203.500000`, `-0.25` or `17`.
    /// Digits past the ninth fractional place are rounded half-to-even.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSecondsError(s.to_string());
        let text = s.trim();

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };

        let head = &frac[..frac.len().min(FRACTION_DIGITS)];
        let mut nanos: i64 = if head.is_empty() {
            0
        } else {
            format!("{:0<width$}", head, width = FRACTION_DIGITS)
                .parse()
                .map_err(|_| err())?
        };

        let tail = frac[head.len()..].as_bytes();
        if let Some((&first, rest)) = tail.split_first() {
            let rest_nonzero = rest.iter().any(|&b| b != b'0');
            if first > b'5' || (first == b'5' && (rest_nonzero || nanos % 2 == 1)) {
                nanos += 1;
            }
        }

        let total = whole
            .checked_mul(NANOS_PER_SECOND)
            .and_then(|v| v.checked_add(nanos))
            .ok_or_else(err)?;

        Ok(Seconds(if negative { -total } else { total }))
    }
}

impl fmt::Display for Seconds {
    /// Shortest exact decimal form: `10`, `5203.5`, `0.001`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / NANOS_PER_SECOND as u64;
        let frac = abs % NANOS_PER_SECOND as u64;

        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:09}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Seconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct SecondsVisitor;

impl Visitor<'_> for SecondsVisitor {
    type Value = Seconds;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("decimal seconds as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Seconds, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Seconds, E> {
        v.checked_mul(NANOS_PER_SECOND)
            .map(Seconds)
            .ok_or_else(|| E::custom(format!("seconds out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Seconds, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("seconds out of range: {}", v)))?;
        self.visit_i64(v)
    }
}

impl<'de> Deserialize<'de> for Seconds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SecondsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> Seconds {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(secs("5203.50"), Seconds::from_millis(5_203_500));
        assert_eq!(secs("17.90"), Seconds::from_millis(17_900));
        assert_eq!(secs("0.1") + secs("0.2"), secs("0.3"));
        assert_eq!(secs(".5"), Seconds::from_millis(500));
        assert_eq!(secs("-0.25"), Seconds::from_millis(-250));
    }

    #[test]
    fn test_parse_rounds_beyond_nanoseconds() {
        assert_eq!(secs("0.0000000015"), Seconds::from_nanos(2));
        assert_eq!(secs("0.0000000025"), Seconds::from_nanos(2));
        assert_eq!(secs("0.00000000250001"), Seconds::from_nanos(3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", ".", "abc", "1.2.3", "1e3", "N/A", "--1", "1:30"] {
            assert!(bad.parse::<Seconds>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_to_millis_rounds_half_to_even() {
        assert_eq!(secs("1.0005").to_millis(), 1000);
        assert_eq!(secs("1.0015").to_millis(), 1002);
        assert_eq!(secs("1.00151").to_millis(), 1002);
        assert_eq!(secs("1.0004999").to_millis(), 1000);
        assert_eq!(secs("-0.0015").to_millis(), -2);
    }

    #[test]
    fn test_from_ticks() {
        assert_eq!(Seconds::from_ticks(17_900, 1, 1000), Some(secs("17.9")));
        assert_eq!(Seconds::from_ticks(44_100, 1, 44_100), Some(secs("1")));
        assert_eq!(Seconds::from_ticks(1, 1, 3), Some(Seconds::from_nanos(333_333_333)));
        assert_eq!(Seconds::from_ticks(1, 1, 0), None);
        assert_eq!(Seconds::from_ticks(i64::MAX, 20_000_000_000, 1), None);
        assert_eq!(Seconds::from_ticks(i64::MAX, i64::MAX, 1), None);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let low = Seconds::from_secs(-9_000_000_000);
        let high = Seconds::from_secs(9_000_000_000);
        assert_eq!(high - low, Seconds::from_nanos(i64::MAX));
        assert_eq!(low - high, Seconds::from_nanos(i64::MIN));
        assert_eq!(high + high, Seconds::from_nanos(i64::MAX));
        assert_eq!(high.checked_sub(low), None);
        assert_eq!(high.checked_add(low), Some(Seconds::ZERO));
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(secs("17.9").clock(), "0:17.90");
        assert_eq!(secs("366.25").clock(), "6:06.25");
        assert_eq!(secs("5203.5").clock(), "1:26:43.50");
        assert_eq!(secs("59.999").clock(), "1:00.00");
    }

    #[test]
    fn test_display_is_shortest_exact() {
        assert_eq!(secs("10.000").to_string(), "10");
        assert_eq!(secs("5203.50").to_string(), "5203.5");
        assert_eq!(secs("0.001").to_string(), "0.001");
        assert_eq!(secs("-1.5").to_string(), "-1.5");
    }

    #[test]
    fn test_deserialize_string_and_integer() {
        let from_str: Seconds = serde_json::from_str("\"1.25\"").unwrap();
        let from_int: Seconds = serde_json::from_str("3").unwrap();
        assert_eq!(from_str, Seconds::from_millis(1250));
        assert_eq!(from_int, Seconds::from_secs(3));
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"1.25\"");
    }
}
